//! Key translation from human-facing to canonical names
//!
//! Rubric authors may write keys in English or French, with or without
//! accents, in any case. [`KEY_TABLE`] is the single source of truth for that
//! vocabulary. [`rename`] is a pure tree transformation: it rewrites mapping
//! keys, recurses into sequences and mappings, and copies the value under
//! `format` verbatim since that belongs to the renderers.
//!
//! A key missing from the table is an error: silently dropping it would hide
//! typos in a rubric.

use serde_yaml::{Mapping, Value};

use crate::error::{ConfigError, Result};

/// Canonical key whose value is passed through without renaming
pub const PASSTHROUGH_KEY: &str = "format";

/// Recognised keys, as `(written form, canonical form)`.
///
/// Written forms are compared after [`normalize_key`].
pub const KEY_TABLE: &[(&str, &str)] = &[
    // evaluation
    ("evaluation", "evaluation"),
    ("évaluation", "evaluation"),
    ("name", "name"),
    ("nom", "name"),
    ("titre", "name"),
    ("title", "name"),
    ("id", "id"),
    ("identifiant", "id"),
    ("identifier", "id"),
    ("points_total", "points_total"),
    ("total", "points_total"),
    ("points_totaux", "points_total"),
    ("total_points", "points_total"),
    ("points", "points"),
    ("pointage", "points"),
    ("points_inference_step", "points_inference_step"),
    ("pas_inférence", "points_inference_step"),
    ("pas_inference", "points_inference_step"),
    ("pas", "points_inference_step"),
    ("points_total_precision", "points_total_precision"),
    ("précision_total", "points_total_precision"),
    ("precision_total", "points_total_precision"),
    ("grade_precision", "grade_precision"),
    ("précision_note", "grade_precision"),
    ("precision_note", "grade_precision"),
    // grade levels
    ("grade_levels", "grade_levels"),
    ("levels", "grade_levels"),
    ("niveaux", "grade_levels"),
    ("niveaux_de_réussite", "grade_levels"),
    ("niveaux_de_reussite", "grade_levels"),
    ("maximum", "maximum"),
    ("max", "maximum"),
    ("minimum", "minimum"),
    ("min", "minimum"),
    // criteria and indicators
    ("criteria", "criteria"),
    ("critères", "criteria"),
    ("criteres", "criteria"),
    ("indicators", "indicators"),
    ("indicateurs", "indicators"),
    ("descriptors", "descriptors"),
    ("descripteurs", "descriptors"),
    // top level
    ("format", "format"),
    ("mise_en_page", "format"),
    ("students", "students"),
    ("étudiants", "students"),
    ("etudiants", "students"),
    ("élèves", "students"),
    ("eleves", "students"),
    // students
    ("omnivox_code", "omnivox_code"),
    ("omnivox", "omnivox_code"),
    ("code_omnivox", "omnivox_code"),
    ("first_name", "first_name"),
    ("prénom", "first_name"),
    ("prenom", "first_name"),
    ("last_name", "last_name"),
    ("nom_de_famille", "last_name"),
    ("alias", "alias"),
    ("pseudo", "alias"),
    ("surnom", "alias"),
    ("team", "team"),
    ("équipe", "team"),
    ("equipe", "team"),
    ("is_team_reference", "is_team_reference"),
    ("team_reference", "is_team_reference"),
    ("référence_équipe", "is_team_reference"),
    ("reference_equipe", "is_team_reference"),
    ("référence", "is_team_reference"),
    ("reference", "is_team_reference"),
];

/// Trim, lower-case, and turn blanks and dashes into underscores.
pub fn normalize_key(key: &str) -> String {
    key.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() || c == '-' { '_' } else { c })
        .collect()
}

/// Canonical form of a written key, if it is recognised.
pub fn canonical_key(key: &str) -> Option<&'static str> {
    let normalized = normalize_key(key);
    KEY_TABLE
        .iter()
        .find(|(written, _)| *written == normalized)
        .map(|(_, canonical)| *canonical)
}

/// Rename every mapping key of a parsed configuration tree.
pub fn rename(value: Value) -> Result<Value> {
    rename_at(value, "$")
}

fn rename_at(value: Value, path: &str) -> Result<Value> {
    match value {
        Value::Mapping(mapping) => rename_mapping(mapping, path).map(Value::Mapping),
        Value::Sequence(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| rename_at(item, &format!("{}[{}]", path, index)))
            .collect::<Result<Vec<_>>>()
            .map(Value::Sequence),
        Value::Tagged(tagged) => rename_at(tagged.value, path),
        other => Ok(other),
    }
}

fn rename_mapping(mapping: Mapping, path: &str) -> Result<Mapping> {
    let mut renamed = Mapping::new();

    for (key, value) in mapping {
        let written = match &key {
            Value::String(s) => s.clone(),
            other => {
                return Err(ConfigError::bad_type(
                    path,
                    format!("mapping keys must be text, found {:?}", other),
                ))
            }
        };
        let canonical =
            canonical_key(&written).ok_or_else(|| ConfigError::unknown_key(&written, path))?;
        let child_path = format!("{}.{}", path, canonical);

        let value = if canonical == PASSTHROUGH_KEY {
            value
        } else {
            rename_at(value, &child_path)?
        };

        if renamed
            .insert(Value::String(canonical.to_string()), value)
            .is_some()
        {
            return Err(ConfigError::bad_type(
                child_path,
                format!("`{}` is given more than once", canonical),
            ));
        }
    }

    Ok(renamed)
}
