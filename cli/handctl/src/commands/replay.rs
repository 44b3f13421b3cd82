//! `handctl replay` - drive a tracker from a JSON-lines script.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Args;
use handtrack_dispatch::{EventFilter, Observable};
use handtrack_events::{EventEnvelope, HandEvent, HandEventKind};
use handtrack_tracker::{HandTracker, TrackerCommand, TrackerConfig, TrackerError};
use tracing::{info, warn};

use crate::error::CliError;
use crate::output::{print_events, print_info, print_warning, OutputFormat};

use super::CommandContext;

#[derive(Debug, Args)]
pub struct ReplayCommand {
    /// Script with one tracker command (JSON) per line. Blank lines and
    /// lines starting with `#` are skipped.
    script: PathBuf,

    /// Keep going when the tracker rejects a command.
    #[arg(long)]
    continue_on_error: bool,

    /// Stop every hand still active once the script ends, at this time.
    #[arg(long)]
    stop_all_at: Option<f32>,

    /// Only print events of these kinds (e.g. hand.created).
    #[arg(long = "kind", value_parser = parse_kind)]
    kinds: Vec<HandEventKind>,
}

fn parse_kind(s: &str) -> Result<HandEventKind, String> {
    s.parse().map_err(|e: handtrack_events::EventError| e.to_string())
}

/// Result of replaying one script.
#[derive(Debug)]
struct Replay {
    /// Events that passed the `--kind` filter, in delivery order.
    events: Vec<EventEnvelope<HandEvent>>,
    applied: usize,
    /// Commands skipped under `--continue-on-error`, by script line.
    rejected: Vec<(usize, TrackerError)>,
    events_raised: u64,
    still_active: usize,
}

impl ReplayCommand {
    #[cfg(test)]
    pub(super) fn kinds(&self) -> &[HandEventKind] {
        &self.kinds
    }

    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let script = fs::read_to_string(&self.script)
            .with_context(|| format!("Failed to read script {:?}", self.script))?;

        let replay = self.replay(&script, ctx.tracker_config)?;

        if ctx.format == OutputFormat::Table {
            for (line, source) in &replay.rejected {
                print_warning(&format!("line {line}: {source}"));
            }
        }
        print_events(&replay.events, ctx.format)?;

        if ctx.format == OutputFormat::Table {
            print_info(&format!(
                "{} commands applied, {} rejected, {} events raised, {} hands still active",
                replay.applied,
                replay.rejected.len(),
                replay.events_raised,
                replay.still_active
            ));
        }
        Ok(())
    }

    fn replay(&self, script: &str, config: TrackerConfig) -> Result<Replay> {
        let collected: Arc<Mutex<Vec<EventEnvelope<HandEvent>>>> = Arc::default();
        let observable = Arc::new(Observable::new());
        {
            let collected = collected.clone();
            observable.add_filtered_observer(
                EventFilter::kinds(self.kinds.iter().copied()),
                move |envelope: &EventEnvelope<HandEvent>| match collected.lock() {
                    Ok(mut events) => events.push(envelope.clone()),
                    Err(poisoned) => poisoned.into_inner().push(envelope.clone()),
                },
            );
        }

        let mut tracker = HandTracker::new(config, observable)?;
        info!(session_id = %tracker.session_id(), script = ?self.script, "Replaying script");

        let mut applied = 0usize;
        let mut rejected = Vec::new();
        for (index, raw) in script.lines().enumerate() {
            let line = index + 1;
            let raw = raw.trim();
            if raw.is_empty() || raw.starts_with('#') {
                continue;
            }

            let command: TrackerCommand =
                serde_json::from_str(raw).map_err(|e| CliError::Script {
                    line,
                    message: e.to_string(),
                })?;

            match tracker.apply(&command) {
                Ok(_) => applied += 1,
                Err(source) if self.continue_on_error => {
                    warn!(line, error = %source, "Skipping rejected command");
                    rejected.push((line, source));
                }
                Err(source) => return Err(CliError::Rejected { line, source }.into()),
            }
        }

        if let Some(time) = self.stop_all_at {
            tracker.stop_tracking_all(time);
        }

        let events = match collected.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        Ok(Replay {
            events,
            applied,
            rejected,
            events_raised: tracker.events_emitted(),
            still_active: tracker.active_hands().len(),
        })
    }
}
