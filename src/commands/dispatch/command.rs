//! Command trait and context for dispatching commands

use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::{Cli, OutputFormat};
use grille_core::error::Result;
use grille_core::model::Rubric;
use grille_core::settings::Settings;

/// Settings from `--settings`, or `grille.toml` in the working directory
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    match &cli.settings {
        Some(path) => Settings::load(path),
        None => {
            let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            Settings::discover(&cwd)
        }
    }
}

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub settings: Settings,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, settings: Settings, start: Instant) -> Self {
        Self {
            cli,
            settings,
            start,
        }
    }

    /// `--format`, falling back to the configured default
    pub fn format(&self) -> OutputFormat {
        self.cli
            .format
            .map(OutputFormat::from)
            .unwrap_or(self.settings.default_format)
    }

    pub fn load_rubric(&self, path: &Path) -> Result<Rubric> {
        let rubric = grille_core::load_config_with(path, &self.settings)?;
        tracing::debug!(elapsed = ?self.start.elapsed(), "load_rubric");
        Ok(rubric)
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("grille {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Rubric-based grading from the command line.");
        println!();
        println!("Run `grille --help` for usage information.");
        Ok(())
    }
}
