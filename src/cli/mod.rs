//! CLI argument parsing for grille
//!
//! Supports global flags: --format, --quiet, --verbose, --log-level,
//! --log-json, --settings

pub mod args;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{CheckArgs, ExportArgs, GradeArgs, ShowArgs, StudentsArgs};
pub use output::{FormatArg, OutputFormat};

/// Grille - rubric-based grading from the command line
#[derive(Parser, Debug)]
#[command(name = "grille")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the `default_format` setting)
    #[arg(long, global = true, value_enum)]
    pub format: Option<FormatArg>,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Log debug information to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log filter, e.g. `debug` or `grille_core=trace`
    #[arg(long, global = true, env = "GRILLE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Settings file (defaults to ./grille.toml when present)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load and validate a rubric
    Check(CheckArgs),

    /// Print a rubric with every inferred value
    Show(ShowArgs),

    /// Ingest grade sheets and report grades per student
    Grade(GradeArgs),

    /// Write the grade-upload sheet
    Export(ExportArgs),

    /// List the cohort with teams
    Students(StudentsArgs),
}
