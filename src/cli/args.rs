//! Command argument structures

use clap::Args;
use std::path::PathBuf;

/// Arguments for the check command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Rubric file (YAML)
    pub config: PathBuf,
}

/// Arguments for the show command.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Rubric file (YAML)
    pub config: PathBuf,

    /// Print the canonical YAML form instead
    #[arg(long)]
    pub canonical: bool,
}

/// Arguments for the grade command.
#[derive(Args, Debug)]
pub struct GradeArgs {
    /// Rubric file (YAML)
    pub config: PathBuf,

    /// Grade sheets: a YAML or JSON list of named-cell mappings
    pub sheets: PathBuf,

    /// Accept grades above an entity's points (overrides the setting)
    #[arg(long)]
    pub allow_overshoot: bool,
}

/// Arguments for the export command.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Rubric file (YAML)
    pub config: PathBuf,

    /// Grade sheets: a YAML or JSON list of named-cell mappings
    pub sheets: PathBuf,

    /// Write to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Field delimiter (defaults to the `students_delimiter` setting)
    #[arg(long)]
    pub delimiter: Option<char>,
}

/// Arguments for the students command.
#[derive(Args, Debug)]
pub struct StudentsArgs {
    /// Rubric file (YAML)
    pub config: PathBuf,
}
