//! Output formatting for CLI commands.

use colored::Colorize;
use handtrack_events::{EventEnvelope, HandEvent};
use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format (one envelope per line for event streams).
    Json,
}

#[derive(Debug, Tabled)]
struct EventRow {
    #[tabled(rename = "SEQ")]
    seq: u64,
    #[tabled(rename = "EVENT")]
    event: &'static str,
    #[tabled(rename = "HAND")]
    hand: i32,
    #[tabled(rename = "POSITION")]
    position: String,
    #[tabled(rename = "TIME")]
    time: String,
    #[tabled(rename = "DETAIL")]
    detail: String,
}

impl From<&EventEnvelope<HandEvent>> for EventRow {
    fn from(envelope: &EventEnvelope<HandEvent>) -> Self {
        let event = &envelope.payload;
        let detail = match event {
            HandEvent::TouchingFovEdge(p) => p.direction().to_string(),
            _ => String::new(),
        };
        Self {
            seq: envelope.seq.value(),
            event: event.event_type(),
            hand: event.hand_id().value(),
            position: event
                .position()
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
            time: format!("{:.3}", event.time()),
            detail,
        }
    }
}

/// Print delivered events in the specified format.
pub fn print_events(events: &[EventEnvelope<HandEvent>], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            if events.is_empty() {
                println!("{}", "No events.".dimmed());
            } else {
                let rows: Vec<EventRow> = events.iter().map(EventRow::from).collect();
                println!("{}", Table::new(rows));
            }
        }
        OutputFormat::Json => {
            for envelope in events {
                println!("{}", envelope.to_json()?);
            }
        }
    }
    Ok(())
}

/// Print a single serializable value as pretty JSON.
pub fn print_json<T: Serialize>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "Info:".blue().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", "Warning:".yellow().bold(), message);
}
