//! Structural validators
//!
//! Each check reports the first violation it finds, naming the offending
//! level, indicator, identifier or student.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;

use crate::error::{ConfigError, Result};
use crate::id::safe_id;
use crate::model::{GradeLevel, GradeLevels, Student};

fn levels_error(level: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::GradeLevelsOrder {
        level: level.to_string(),
        reason: reason.into(),
    }
}

/// Grade levels descend from 100% to 0% without overlapping.
pub fn grade_levels(levels: &[GradeLevel]) -> Result<()> {
    let (Some(first), Some(last)) = (levels.first(), levels.last()) else {
        return Err(levels_error("-", "at least one grade level is required"));
    };

    for (index, level) in levels.iter().enumerate() {
        if level.name().trim().is_empty() {
            return Err(levels_error(
                &format!("#{}", index + 1),
                "level name is empty",
            ));
        }
        for bound in [level.min_percent(), level.max_percent()] {
            if bound < Decimal::ZERO || bound > Decimal::ONE_HUNDRED {
                return Err(levels_error(
                    level.name(),
                    format!("bound {} is outside [0, 100]", bound),
                ));
            }
        }
        if level.min_percent() > level.max_percent() {
            return Err(levels_error(
                level.name(),
                format!(
                    "minimum {} is above maximum {}",
                    level.min_percent(),
                    level.max_percent()
                ),
            ));
        }
    }

    if first.max_percent() != Decimal::ONE_HUNDRED {
        return Err(levels_error(
            first.name(),
            format!("the first level must reach 100, not {}", first.max_percent()),
        ));
    }
    if !last.min_percent().is_zero() {
        return Err(levels_error(
            last.name(),
            format!("the last level must start at 0, not {}", last.min_percent()),
        ));
    }

    for pair in levels.windows(2) {
        let (hi, lo) = (&pair[0], &pair[1]);
        if lo.max_percent() > hi.min_percent() {
            return Err(levels_error(
                lo.name(),
                format!(
                    "maximum {} overlaps `{}`, which starts at {}",
                    lo.max_percent(),
                    hi.name(),
                    hi.min_percent()
                ),
            ));
        }
        if lo.max_percent() >= hi.max_percent() {
            return Err(levels_error(
                lo.name(),
                format!(
                    "maximum {} does not descend below `{}`",
                    lo.max_percent(),
                    hi.name()
                ),
            ));
        }
    }

    Ok(())
}

/// One descriptor slot per grade level, at least one of them written.
pub fn descriptors(
    indicator_id: &str,
    descriptors: &[Option<String>],
    levels: &GradeLevels,
) -> Result<()> {
    if descriptors.len() < levels.len() {
        let missing = levels
            .get(descriptors.len())
            .map(GradeLevel::name)
            .unwrap_or_default();
        return Err(ConfigError::MissingDescriptor {
            indicator: indicator_id.to_string(),
            level: missing.to_string(),
        });
    }
    if descriptors.len() > levels.len() {
        return Err(ConfigError::bad_type(
            format!("indicator `{}` descriptors", indicator_id),
            format!(
                "expected {} descriptors, one per grade level, found {}",
                levels.len(),
                descriptors.len()
            ),
        ));
    }
    let written = descriptors
        .iter()
        .flatten()
        .any(|d| !d.trim().is_empty());
    if !written {
        let level = levels.get(0).map(GradeLevel::name).unwrap_or_default();
        return Err(ConfigError::MissingDescriptor {
            indicator: indicator_id.to_string(),
            level: level.to_string(),
        });
    }
    Ok(())
}

/// Identifiers are safe and pairwise distinct (case-sensitive).
///
/// All duplicates are reported at once, in order of first repetition.
pub fn identifiers<'a>(ids: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    let mut duplicates: Vec<String> = Vec::new();

    for id in ids {
        safe_id(id)?;
        if !seen.insert(id) && !duplicates.iter().any(|d| d == id) {
            duplicates.push(id.to_string());
        }
    }

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::DuplicateId { ids: duplicates })
    }
}

/// Unique aliases and omnivox codes; exactly one reference per team.
pub fn students(students: &[Student]) -> Result<()> {
    let mut aliases = HashSet::new();
    let mut codes = HashSet::new();

    for student in students {
        if !aliases.insert(student.alias()) {
            return Err(ConfigError::StudentDupAlias {
                alias: student.alias().to_string(),
            });
        }
        if !codes.insert(student.omnivox_code()) {
            return Err(ConfigError::DuplicateId {
                ids: vec![student.omnivox_code().to_string()],
            });
        }
        if student.is_team_reference() && student.team().is_none() {
            return Err(ConfigError::bad_type(
                format!("student `{}`", student.alias()),
                "is marked as team reference but belongs to no team",
            ));
        }
    }

    let mut teams: Vec<&str> = Vec::new();
    let mut references: HashMap<&str, Vec<&str>> = HashMap::new();
    for student in students {
        if let Some(team) = student.team() {
            if !teams.contains(&team) {
                teams.push(team);
            }
            let entry = references.entry(team).or_default();
            if student.is_team_reference() {
                entry.push(student.alias());
            }
        }
    }

    for team in teams {
        let refs = references.get(team).map(Vec::as_slice).unwrap_or_default();
        match refs.len() {
            0 => {
                return Err(ConfigError::TeamReferenceMissing {
                    team: team.to_string(),
                })
            }
            1 => {}
            _ => {
                return Err(ConfigError::TeamReferenceDuplicate {
                    team: team.to_string(),
                    students: refs.iter().map(|s| s.to_string()).collect(),
                })
            }
        }
    }

    Ok(())
}
