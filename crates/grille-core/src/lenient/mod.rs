//! Lenient configuration model
//!
//! Mirrors the validated model but lets authors leave out points, totals and
//! identifiers. [`LenientEvaluation::complete`] infers what is missing and
//! produces the strict [`Evaluation`](crate::model::Evaluation).

mod complete;
pub mod rename;

pub use complete::{
    DEFAULT_GRADE_PRECISION, DEFAULT_POINTS_INFERENCE_STEP, DEFAULT_POINTS_TOTAL_PRECISION,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::error::{ConfigError, Result};

/// Evaluation as authored, after key renaming
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LenientEvaluation {
    pub name: String,
    pub id: Option<String>,
    pub points_total: Option<Decimal>,
    pub points_inference_step: Option<Decimal>,
    pub points_total_precision: Option<u32>,
    pub grade_precision: Option<u32>,
    pub grade_levels: Vec<LenientGradeLevel>,
    pub criteria: Vec<LenientCriterion>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LenientGradeLevel {
    pub name: String,
    pub maximum: Decimal,
    pub minimum: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LenientCriterion {
    pub id: Option<String>,
    pub name: String,
    pub points_total: Option<Decimal>,
    pub indicators: Vec<LenientIndicator>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LenientIndicator {
    pub id: Option<String>,
    pub name: String,
    pub points: Option<Decimal>,
    pub descriptors: Vec<Option<String>>,
}

/// A student row before trimming and validation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LenientStudent {
    #[serde(default, deserialize_with = "text_or_number")]
    pub omnivox_code: Option<String>,
    pub first_name: Option<String>,
    /// In a student row, a bare "name" ("nom") is the family name
    #[serde(alias = "name")]
    pub last_name: Option<String>,
    pub alias: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub team: Option<String>,
    #[serde(default)]
    pub is_team_reference: Option<Flag>,
}

/// A yes/no cell as humans write it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Number(i64),
    Text(String),
}

impl Flag {
    /// Interpret the flag; `path` names the cell in errors.
    pub fn resolve(&self, path: &str) -> Result<bool> {
        match self {
            Flag::Bool(b) => Ok(*b),
            Flag::Number(n) => Ok(*n != 0),
            Flag::Text(text) => parse_flag(text).ok_or_else(|| {
                ConfigError::bad_type(path, format!("`{}` is not a yes/no value", text))
            }),
        }
    }
}

/// Parse yes/no text in English or French; blank means no.
pub fn parse_flag(text: &str) -> Option<bool> {
    match text.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "oui" | "o" | "vrai" | "1" | "x" => Some(true),
        "false" | "no" | "n" | "non" | "faux" | "0" | "" => Some(false),
        _ => None,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Integer(i64),
    Number(Decimal),
}

fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<TextOrNumber> = Option::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        TextOrNumber::Text(s) => s,
        TextOrNumber::Integer(n) => n.to_string(),
        TextOrNumber::Number(d) => d.normalize().to_string(),
    }))
}

/// Deserialize a renamed tree, mapping serde failures onto error kinds.
pub fn from_value<T>(value: serde_yaml::Value, path: &str) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_yaml::from_value(value).map_err(|e| classify_serde_error(&e.to_string(), path))
}

fn classify_serde_error(message: &str, path: &str) -> ConfigError {
    if let Some(rest) = message.split("missing field `").nth(1) {
        let field = rest.split('`').next().unwrap_or_default();
        return ConfigError::missing_field(field, path);
    }
    if let Some(rest) = message.split("unknown field `").nth(1) {
        let key = rest.split('`').next().unwrap_or_default();
        return ConfigError::unknown_key(key, path);
    }
    ConfigError::bad_type(path, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_is_classified() {
        let value: serde_yaml::Value = serde_yaml::from_str("name: Exam\ncriteria: []\n").unwrap();
        let err = from_value::<LenientEvaluation>(value, "$.evaluation").unwrap_err();
        match err {
            ConfigError::MissingField { field, path } => {
                assert_eq!(field, "grade_levels");
                assert_eq!(path, "$.evaluation");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_wrong_type_is_bad_type() {
        let value: serde_yaml::Value =
            serde_yaml::from_str("name: I\npoints: many\ndescriptors: [a]\n").unwrap();
        let err = from_value::<LenientIndicator>(value, "$").unwrap_err();
        assert!(matches!(err, ConfigError::BadType { .. }));
    }

    #[test]
    fn test_points_accept_decimals_and_strings() {
        let value: serde_yaml::Value =
            serde_yaml::from_str("name: I\npoints: 2.5\ndescriptors: [a]\n").unwrap();
        let indicator: LenientIndicator = from_value(value, "$").unwrap();
        assert_eq!(indicator.points, Some(Decimal::new(25, 1)));

        let value: serde_yaml::Value =
            serde_yaml::from_str("name: I\npoints: '2.5'\ndescriptors: [a]\n").unwrap();
        let indicator: LenientIndicator = from_value(value, "$").unwrap();
        assert_eq!(indicator.points, Some(Decimal::new(25, 1)));
    }

    #[test]
    fn test_student_flags_and_numeric_codes() {
        let value: serde_yaml::Value = serde_yaml::from_str(
            "omnivox_code: 2034567\nfirst_name: Ada\nname: Lovelace\nalias: ada\nteam: 3\nis_team_reference: oui\n",
        )
        .unwrap();
        let student: LenientStudent = from_value(value, "$").unwrap();
        assert_eq!(student.omnivox_code.as_deref(), Some("2034567"));
        assert_eq!(student.last_name.as_deref(), Some("Lovelace"));
        assert_eq!(student.team.as_deref(), Some("3"));
        assert!(student.is_team_reference.unwrap().resolve("$").unwrap());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag(" X "), Some(true));
        assert_eq!(parse_flag("Non"), Some(false));
        assert_eq!(parse_flag(""), Some(false));
        assert_eq!(parse_flag("peut-être"), None);
    }
}
