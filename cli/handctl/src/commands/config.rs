//! `handctl config`.

use anyhow::Result;
use clap::Args;

use crate::output::{print_json, OutputFormat};

use super::CommandContext;

#[derive(Debug, Args)]
pub struct ConfigCommand {}

impl ConfigCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        match ctx.format {
            OutputFormat::Json => print_json(&ctx.tracker_config),
            OutputFormat::Table => {
                print!("{}", toml::to_string_pretty(&ctx.tracker_config)?);
                Ok(())
            }
        }
    }
}
