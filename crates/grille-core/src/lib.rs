//! Grille Core Library
//!
//! Evaluation model, points and grade inference, and grade-sheet ingestion
//! for rubric-based grading.

pub mod config;
pub mod decimal;
pub mod error;
pub mod export;
pub mod format;
pub mod gradesheet;
pub mod id;
pub mod inference;
pub mod lenient;
pub mod logging;
pub mod model;
pub mod rollup;
pub mod settings;
pub mod students;
pub mod validate;

pub use config::{load_config, load_config_str, load_config_with};
pub use error::{ConfigError, ErrorKind, Result};
pub use gradesheet::{load_gradesheet, load_gradesheets, Checked, GradeSheet, IngestOptions};
pub use model::Rubric;
