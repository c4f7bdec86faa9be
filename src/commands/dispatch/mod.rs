//! Command dispatch logic for grille

use std::time::Instant;

use crate::cli::Cli;
use grille_core::error::Result;
use tracing::debug;

mod command;
mod commands;

pub use command::CommandContext;
use command::{Command, NoCommand};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let settings = command::load_settings(cli)?;

    debug!(elapsed = ?start.elapsed(), "load_settings");

    let ctx = CommandContext::new(cli, settings, start);

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}
