//! Identifier hygiene
//!
//! Identifiers name evaluations, criteria and indicators, and are turned into
//! spreadsheet defined names by plain concatenation:
//! - `<id>_points` holds the grade of the entity
//! - `<id>_commentaire` holds the comment of the entity
//!
//! No escaping happens on derivation, so unsafe identifiers are rejected as
//! early as possible.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ConfigError, Result};

/// Named cell holding the student's omnivox code; reserved as an identifier
pub const OMNIVOX: &str = "OMNIVOX";

/// Default identifier of an evaluation
pub const DEFAULT_EVALUATION_ID: &str = "eval";

/// Suffix of the named cell holding an entity's grade
pub const POINTS_SUFFIX: &str = "_points";

/// Suffix of the named cell holding an entity's comment
pub const COMMENT_SUFFIX: &str = "_commentaire";

static ID_PATTERN: OnceLock<Regex> = OnceLock::new();

fn id_pattern() -> &'static Regex {
    ID_PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("identifier pattern is valid")
    })
}

/// True when `s` can be used verbatim inside a defined name.
pub fn is_safe_id(s: &str) -> bool {
    s != OMNIVOX && id_pattern().is_match(s)
}

/// Validate an identifier.
pub fn safe_id(s: &str) -> Result<&str> {
    if is_safe_id(s) {
        Ok(s)
    } else {
        Err(ConfigError::UnsafeId { id: s.to_string() })
    }
}

/// Name of the cell holding the grade of entity `id`.
pub fn points_name(id: &str) -> String {
    format!("{}{}", id, POINTS_SUFFIX)
}

/// Name of the cell holding the comment on entity `id`.
pub fn comment_name(id: &str) -> String {
    format!("{}{}", id, COMMENT_SUFFIX)
}

/// Identifier given to the `index`-th criterion (0-based) when none is set.
pub fn derived_criterion_id(index: usize) -> String {
    format!("c{}", index + 1)
}

/// Identifier given to an indicator (0-based positions) when none is set.
pub fn derived_indicator_id(criterion_id: &str, index: usize) -> String {
    format!("{}_i{}", criterion_id, index + 1)
}
