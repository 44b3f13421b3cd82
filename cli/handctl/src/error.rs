//! Error handling and display for the CLI.

use colored::Colorize;
use handtrack_tracker::TrackerError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("line {line}: not a tracker command: {message}")]
    Script { line: usize, message: String },

    #[error("line {line}: command rejected")]
    Rejected {
        line: usize,
        #[source]
        source: TrackerError,
    },
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);
    for cause in err.chain().skip(1) {
        eprintln!("  {} {}", "caused by:".dimmed(), cause);
    }

    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        match cli_err {
            CliError::Script { .. } => {
                eprintln!(
                    "\n{}",
                    "Hint: each line must be a JSON object with an \"op\" of start, update, stop or stop_all."
                        .yellow()
                );
            }
            CliError::Rejected {
                source: TrackerError::UnknownHand(_),
                ..
            } => {
                eprintln!(
                    "\n{}",
                    "Hint: handles are assigned 1, 2, 3... in start order and reused after stop."
                        .yellow()
                );
            }
            CliError::Rejected { .. } => {
                eprintln!(
                    "\n{}",
                    "Hint: pass --continue-on-error to skip rejected commands.".yellow()
                );
            }
        }
    }
}
