//! Resolves the tracker configuration: defaults, then the `--config` file,
//! then `HANDTRACK_*` environment variables.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use handtrack_tracker::TrackerConfig;

pub fn load(path: Option<&Path>) -> Result<TrackerConfig> {
    let base = match path {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            TrackerConfig::from_toml_str(&contents)
                .with_context(|| format!("Failed to parse config from {:?}", path))?
        }
        None => TrackerConfig::default(),
    };

    base.with_overrides(|key| std::env::var(key).ok())
        .context("Invalid HANDTRACK_* environment override")
}
