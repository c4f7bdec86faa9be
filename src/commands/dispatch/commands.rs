//! Command implementations for all grille commands

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use grille_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Check(args) => crate::commands::check::execute(ctx, args),
            Commands::Show(args) => crate::commands::show::execute(ctx, args),
            Commands::Grade(args) => crate::commands::grade::execute(ctx, args),
            Commands::Export(args) => crate::commands::export::execute(ctx, args),
            Commands::Students(args) => crate::commands::students::execute(ctx, args),
        }
    }
}
