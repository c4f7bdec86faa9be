//! Tool settings for grille
//!
//! Settings live in `grille.toml`, looked up in the working directory unless a
//! path is given explicitly. Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::PERCENTAGE_QUANTUM;
use crate::error::{ConfigError, Result};
use crate::format::OutputFormat;
use crate::gradesheet::IngestOptions;

/// Settings file name looked up by [`Settings::discover`]
pub const SETTINGS_FILE: &str = "grille.toml";

/// Tool settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Accept grades above an entity's points (reported as warnings)
    #[serde(default)]
    pub allow_overshoot: bool,

    /// Quantum of reported percentages
    #[serde(default = "default_percentage_quantum")]
    pub percentage_quantum: Decimal,

    /// Field delimiter of delimited student lists
    #[serde(default = "default_students_delimiter")]
    pub students_delimiter: char,

    /// Output format used when `--format` is not given
    #[serde(default)]
    pub default_format: OutputFormat,
}

fn default_percentage_quantum() -> Decimal {
    PERCENTAGE_QUANTUM
}

fn default_students_delimiter() -> char {
    ','
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            allow_overshoot: false,
            percentage_quantum: default_percentage_quantum(),
            students_delimiter: default_students_delimiter(),
            default_format: OutputFormat::default(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let settings: Settings = toml::from_str(&content)?;
        settings.check()?;
        Ok(settings)
    }

    /// Load `grille.toml` from `dir` if present, defaults otherwise
    pub fn discover(dir: &Path) -> Result<Self> {
        let path: PathBuf = dir.join(SETTINGS_FILE);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading settings");
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    fn check(&self) -> Result<()> {
        if self.percentage_quantum <= Decimal::ZERO || self.percentage_quantum > Decimal::ONE {
            return Err(ConfigError::bad_type(
                "percentage_quantum",
                format!("must be in (0, 1], found {}", self.percentage_quantum),
            ));
        }
        if !self.students_delimiter.is_ascii() {
            return Err(ConfigError::bad_type(
                "students_delimiter",
                format!("`{}` is not a single-byte character", self.students_delimiter),
            ));
        }
        Ok(())
    }

    /// Delimiter as the byte the CSV reader expects
    pub fn delimiter_byte(&self) -> u8 {
        u8::try_from(self.students_delimiter).unwrap_or(b',')
    }

    /// Grade-sheet ingestion options derived from these settings
    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            allow_overshoot: self.allow_overshoot,
            percentage_quantum: self.percentage_quantum,
        }
    }
}
