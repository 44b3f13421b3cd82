//! CLI commands.

mod config;
mod replay;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use handtrack_tracker::TrackerConfig;

use crate::output::OutputFormat;

/// handctl - replay scripted hand tracking sessions and inspect their events.
#[derive(Debug, Parser)]
#[command(name = "handctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Tracker configuration file (TOML).
    #[arg(long, global = true, env = "HANDTRACK_CONFIG")]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, global = true, env = "HANDTRACK_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Replay a script of tracker commands and print the raised events.
    Replay(replay::ReplayCommand),

    /// Print the resolved tracker configuration.
    Config(config::ConfigCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    pub fn log_json(&self) -> bool {
        self.log_json
    }

    /// Run the CLI command.
    pub fn run(self) -> Result<()> {
        let tracker_config = crate::settings::load(self.config.as_deref())?;
        let ctx = CommandContext {
            tracker_config,
            format: self.format,
        };

        match self.command {
            Commands::Replay(cmd) => cmd.run(ctx),
            Commands::Config(cmd) => cmd.run(ctx),
            Commands::Version => {
                println!("handctl {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub tracker_config: TrackerConfig,
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use handtrack_events::HandEventKind;

    #[test]
    fn test_parse_replay_args() {
        let cli = Cli::try_parse_from([
            "handctl",
            "--format",
            "json",
            "replay",
            "session.jsonl",
            "--continue-on-error",
            "--kind",
            "hand.created",
            "--kind",
            "hand.destroyed",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        let Commands::Replay(replay) = cli.command else {
            panic!("expected replay command");
        };
        assert_eq!(
            replay.kinds(),
            &[HandEventKind::Created, HandEventKind::Destroyed]
        );
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let result = Cli::try_parse_from(["handctl", "replay", "s.jsonl", "--kind", "hand.waved"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_format_is_table() {
        let cli = Cli::try_parse_from(["handctl", "config"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Table);
        assert!(!cli.log_json());
    }
}
