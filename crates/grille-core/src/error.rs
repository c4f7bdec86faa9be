//! Error types and exit codes for grille
//!
//! Every failure raised while loading a rubric, a cohort or a grade sheet is
//! a [`ConfigError`]. The data variants form a closed set of kinds (see
//! [`ErrorKind`]), each carrying the entity it was detected on.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (I/O, unreadable file)
//! - 2: Usage error (bad flags/args)
//! - 3: Data error (invalid rubric, students or grades)

mod macros;

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Exit codes for the grille binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - invalid rubric, cohort or grade sheet (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Tag identifying the kind of a [`ConfigError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnknownKey,
    MissingField,
    BadType,
    UnsafeId,
    DuplicateId,
    GradeLevelsOrder,
    MissingDescriptor,
    PointsOverflow,
    PointsUnderflow,
    Underspecified,
    GradeOutOfRange,
    GradeAtNullDescriptor,
    StudentDupAlias,
    TeamReferenceMissing,
    TeamReferenceDuplicate,
    OmnivoxMissing,
    /// Bad command-line usage
    Usage,
    /// File could not be read or written
    Io,
    /// Input is not well-formed YAML/JSON/TOML/CSV
    Syntax,
}

impl ErrorKind {
    /// The snake_case name of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::UnknownKey => "unknown_key",
            ErrorKind::MissingField => "missing_field",
            ErrorKind::BadType => "bad_type",
            ErrorKind::UnsafeId => "unsafe_id",
            ErrorKind::DuplicateId => "duplicate_id",
            ErrorKind::GradeLevelsOrder => "grade_levels_order",
            ErrorKind::MissingDescriptor => "missing_descriptor",
            ErrorKind::PointsOverflow => "points_overflow",
            ErrorKind::PointsUnderflow => "points_underflow",
            ErrorKind::Underspecified => "underspecified",
            ErrorKind::GradeOutOfRange => "grade_out_of_range",
            ErrorKind::GradeAtNullDescriptor => "grade_at_null_descriptor",
            ErrorKind::StudentDupAlias => "student_dup_alias",
            ErrorKind::TeamReferenceMissing => "team_reference_missing",
            ErrorKind::TeamReferenceDuplicate => "team_reference_duplicate",
            ErrorKind::OmnivoxMissing => "omnivox_missing",
            ErrorKind::Usage => "usage_error",
            ErrorKind::Io => "io_error",
            ErrorKind::Syntax => "syntax_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while loading and validating rubrics, cohorts and grades
#[derive(Error, Debug)]
pub enum ConfigError {
    // Data errors (exit code 3)
    #[error("unknown key `{key}` at {path}")]
    UnknownKey { key: String, path: String },

    #[error("missing field `{field}` at {path}")]
    MissingField { field: String, path: String },

    #[error("invalid value at {path}: {reason}")]
    BadType { path: String, reason: String },

    #[error("unsafe identifier `{id}` (expected a letter followed by letters, digits or `_`, and not `OMNIVOX`)")]
    UnsafeId { id: String },

    #[error("duplicate identifiers: {}", .ids.join(", "))]
    DuplicateId { ids: Vec<String> },

    #[error("grade levels out of order at `{level}`: {reason}")]
    GradeLevelsOrder { level: String, reason: String },

    #[error("indicator `{indicator}` has no descriptor for grade level `{level}`")]
    MissingDescriptor { indicator: String, level: String },

    #[error("points of {entity} sum to {assigned}, above its total of {total}")]
    PointsOverflow {
        entity: String,
        total: Decimal,
        assigned: Decimal,
    },

    #[error("points of {entity} sum to {assigned}, below its total of {total}")]
    PointsUnderflow {
        entity: String,
        total: Decimal,
        assigned: Decimal,
    },

    #[error("{entity} is underspecified: {reason}")]
    Underspecified { entity: String, reason: String },

    #[error("grade {grade} of `{entity}` is outside [0, {points}]")]
    GradeOutOfRange {
        entity: String,
        grade: Decimal,
        points: Decimal,
    },

    #[error("indicator `{indicator}` is graded at level `{level}`, which has no descriptor")]
    GradeAtNullDescriptor { indicator: String, level: String },

    #[error("alias `{alias}` is used by more than one student")]
    StudentDupAlias { alias: String },

    #[error("team `{team}` has no reference student")]
    TeamReferenceMissing { team: String },

    #[error("team `{team}` has several reference students: {}", .students.join(", "))]
    TeamReferenceDuplicate { team: String, students: Vec<String> },

    #[error("grade sheet {sheet} has no OMNIVOX code")]
    OmnivoxMissing { sheet: String },

    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    // Generic failures (exit code 1)
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ConfigError {
    /// Create an error for an unrecognised configuration key
    pub fn unknown_key(key: impl Into<String>, path: impl Into<String>) -> Self {
        ConfigError::UnknownKey {
            key: key.into(),
            path: path.into(),
        }
    }

    /// Create an error for a missing required field
    pub fn missing_field(field: impl Into<String>, path: impl Into<String>) -> Self {
        ConfigError::MissingField {
            field: field.into(),
            path: path.into(),
        }
    }

    /// Create an error for a value of the wrong shape
    pub fn bad_type(path: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        ConfigError::BadType {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an error for an entity the inference engines could not complete
    pub fn underspecified(entity: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        ConfigError::Underspecified {
            entity: entity.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an error for a failed file operation
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }

    /// Get the kind tag of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::UnknownKey { .. } => ErrorKind::UnknownKey,
            ConfigError::MissingField { .. } => ErrorKind::MissingField,
            ConfigError::BadType { .. } => ErrorKind::BadType,
            ConfigError::UnsafeId { .. } => ErrorKind::UnsafeId,
            ConfigError::DuplicateId { .. } => ErrorKind::DuplicateId,
            ConfigError::GradeLevelsOrder { .. } => ErrorKind::GradeLevelsOrder,
            ConfigError::MissingDescriptor { .. } => ErrorKind::MissingDescriptor,
            ConfigError::PointsOverflow { .. } => ErrorKind::PointsOverflow,
            ConfigError::PointsUnderflow { .. } => ErrorKind::PointsUnderflow,
            ConfigError::Underspecified { .. } => ErrorKind::Underspecified,
            ConfigError::GradeOutOfRange { .. } => ErrorKind::GradeOutOfRange,
            ConfigError::GradeAtNullDescriptor { .. } => ErrorKind::GradeAtNullDescriptor,
            ConfigError::StudentDupAlias { .. } => ErrorKind::StudentDupAlias,
            ConfigError::TeamReferenceMissing { .. } => ErrorKind::TeamReferenceMissing,
            ConfigError::TeamReferenceDuplicate { .. } => ErrorKind::TeamReferenceDuplicate,
            ConfigError::OmnivoxMissing { .. } => ErrorKind::OmnivoxMissing,
            ConfigError::UsageError(_) => ErrorKind::Usage,
            ConfigError::Io { .. } => ErrorKind::Io,
            ConfigError::Yaml(_)
            | ConfigError::Json(_)
            | ConfigError::Toml(_)
            | ConfigError::Csv(_) => ErrorKind::Syntax,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self.kind() {
            ErrorKind::Usage => ExitCode::Usage,
            ErrorKind::Io | ErrorKind::Syntax => ExitCode::Failure,
            _ => ExitCode::Data,
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        let mut error_obj = serde_json::json!({
            "code": self.exit_code() as i32,
            "type": self.error_type(),
            "message": self.to_string(),
        });

        match self {
            ConfigError::DuplicateId { ids } => error_obj["ids"] = serde_json::json!(ids),
            ConfigError::PointsOverflow { entity, .. }
            | ConfigError::PointsUnderflow { entity, .. }
            | ConfigError::Underspecified { entity, .. }
            | ConfigError::GradeOutOfRange { entity, .. } => {
                error_obj["entity"] = serde_json::json!(entity)
            }
            ConfigError::GradeAtNullDescriptor { indicator, level }
            | ConfigError::MissingDescriptor { indicator, level } => {
                error_obj["indicator"] = serde_json::json!(indicator);
                error_obj["level"] = serde_json::json!(level);
            }
            ConfigError::UnknownKey { path, .. }
            | ConfigError::MissingField { path, .. }
            | ConfigError::BadType { path, .. } => error_obj["path"] = serde_json::json!(path),
            _ => {}
        }

        serde_json::json!({ "error": error_obj })
    }
}

/// Result type alias for grille operations
pub type Result<T> = std::result::Result<T, ConfigError>;
