//! Grade-sheet ingestion
//!
//! A raw sheet maps named cells to values, as read from a student's
//! gradebook: `OMNIVOX` holds the student's code, `<id>_points` the grade of
//! an entity and `<id>_commentaire` a comment on it. Ingestion parses those
//! cells, completes the grades, then checks them against the rubric.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::decimal::{parse_decimal, PERCENTAGE_QUANTUM};
use crate::error::{ConfigError, Result};
use crate::id::{comment_name, points_name, OMNIVOX};
use crate::inference::grades::{infer_grades, Grades};
use crate::model::{EntityRef, Evaluation, Rubric};
use crate::rollup::{percentage_of, Entity};

/// Text standing for "no value" in exported spreadsheets
pub const NOT_AVAILABLE: &str = "#N/A";

/// Value of one named cell
///
/// Quoted cells stay text, so codes keep their leading zeros and comments
/// their spelling; [`CellValue::number`] parses text on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(Decimal),
}

impl CellValue {
    /// Text of the cell, `None` when it is empty, blank or `#N/A`.
    fn text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Number(n) => Some(n.normalize().to_string()),
            CellValue::Text(t) => {
                let t = t.trim();
                if t.is_empty() || t.eq_ignore_ascii_case(NOT_AVAILABLE) {
                    None
                } else {
                    Some(t.to_string())
                }
            }
        }
    }

    /// Number in the cell; text is parsed leniently.
    fn number(&self, cell: &str) -> Result<Option<Decimal>> {
        match self {
            CellValue::Number(n) => Ok(Some(*n)),
            other => match other.text() {
                None => Ok(None),
                Some(text) => parse_decimal(&text).map(Some).ok_or_else(|| {
                    ConfigError::bad_type(cell, format!("`{}` is not a number", text))
                }),
            },
        }
    }
}

/// One student's gradebook, as named cells
pub type RawSheet = BTreeMap<String, CellValue>;

/// Knobs of grade-sheet ingestion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    /// Accept grades above an entity's points, reporting them as warnings
    pub allow_overshoot: bool,
    /// Quantum of the percentages used to pick grade levels
    pub percentage_quantum: Decimal,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            allow_overshoot: false,
            percentage_quantum: PERCENTAGE_QUANTUM,
        }
    }
}

/// Validated grades and comments of one student
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeSheet {
    omnivox_code: String,
    grades: Grades,
    comments: BTreeMap<String, String>,
}

impl GradeSheet {
    pub fn omnivox_code(&self) -> &str {
        &self.omnivox_code
    }

    /// Grade of entity `id`, unrounded.
    pub fn grade(&self, id: &str) -> Option<Decimal> {
        self.grades.get(id).copied()
    }

    pub fn comment(&self, id: &str) -> Option<&str> {
        self.comments.get(id).map(String::as_str)
    }

    pub fn grades(&self) -> &Grades {
        &self.grades
    }

    pub fn comments(&self) -> &BTreeMap<String, String> {
        &self.comments
    }
}

/// A non-fatal finding raised while ingesting a sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GradeWarning {
    /// The indicators of a criterion add up to more than its grade
    IndicatorsAboveCriterion {
        omnivox_code: String,
        criterion: String,
        indicators: Decimal,
        grade: Decimal,
    },
    /// A grade above the entity's points, accepted by option
    Overshoot {
        omnivox_code: String,
        entity: String,
        grade: Decimal,
        points: Decimal,
    },
    /// The sheet's code matches no student of the cohort
    UnknownStudent { omnivox_code: String },
}

impl fmt::Display for GradeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeWarning::IndicatorsAboveCriterion {
                omnivox_code,
                criterion,
                indicators,
                grade,
            } => write!(
                f,
                "{}: indicators of `{}` add up to {}, above its grade of {}",
                omnivox_code, criterion, indicators, grade
            ),
            GradeWarning::Overshoot {
                omnivox_code,
                entity,
                grade,
                points,
            } => write!(
                f,
                "{}: grade {} of `{}` is above its {} points",
                omnivox_code, grade, entity, points
            ),
            GradeWarning::UnknownStudent { omnivox_code } => {
                write!(f, "{}: no student has this omnivox code", omnivox_code)
            }
        }
    }
}

/// A value together with the warnings raised while producing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checked<T> {
    pub value: T,
    pub warnings: Vec<GradeWarning>,
}

impl<T> Checked<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }
}

/// Ingest one raw sheet.
pub fn load_gradesheet(
    rubric: &Rubric,
    raw: &RawSheet,
    options: &IngestOptions,
) -> Result<Checked<GradeSheet>> {
    ingest(rubric, raw, options, "#1")
}

/// Ingest several raw sheets, stopping at the first invalid one.
pub fn load_gradesheets(
    rubric: &Rubric,
    raws: &[RawSheet],
    options: &IngestOptions,
) -> Result<Checked<Vec<GradeSheet>>> {
    let mut checked = Checked::new(Vec::with_capacity(raws.len()));
    for (index, raw) in raws.iter().enumerate() {
        let sheet = ingest(rubric, raw, options, &format!("#{}", index + 1))?;
        checked.warnings.extend(sheet.warnings);
        checked.value.push(sheet.value);
    }
    Ok(checked)
}

/// Read raw sheets from a YAML or JSON file holding a list of mappings.
pub fn read_raw_sheets(path: &Path) -> Result<Vec<RawSheet>> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(serde_json::from_str(&text)?)
    } else {
        Ok(serde_yaml::from_str(&text)?)
    }
}

fn ingest(
    rubric: &Rubric,
    raw: &RawSheet,
    options: &IngestOptions,
    label: &str,
) -> Result<Checked<GradeSheet>> {
    let evaluation = rubric.evaluation();
    let omnivox_code = raw
        .get(OMNIVOX)
        .and_then(CellValue::text)
        .ok_or_else(|| ConfigError::OmnivoxMissing {
            sheet: label.to_string(),
        })?;

    let (partial, comments) = read_cells(evaluation, raw, &omnivox_code)?;
    let grades = infer_grades(evaluation, &partial)?;

    let mut checked = Checked::new(GradeSheet {
        omnivox_code,
        grades,
        comments,
    });
    check_bounds(evaluation, options, &mut checked)?;
    check_criteria(evaluation, &mut checked);
    check_descriptors(evaluation, options, &checked.value)?;

    if !rubric.students().is_empty()
        && rubric.student_by_omnivox(&checked.value.omnivox_code).is_none()
    {
        checked.warnings.push(GradeWarning::UnknownStudent {
            omnivox_code: checked.value.omnivox_code.clone(),
        });
    }
    for warning in &checked.warnings {
        warn!(%warning, "grade sheet warning");
    }

    debug!(
        omnivox = %checked.value.omnivox_code,
        grades = checked.value.grades.len(),
        comments = checked.value.comments.len(),
        "grade sheet ingested"
    );
    Ok(checked)
}

fn read_cells(
    evaluation: &Evaluation,
    raw: &RawSheet,
    omnivox_code: &str,
) -> Result<(Grades, BTreeMap<String, String>)> {
    let mut grades = Grades::new();
    let mut comments = BTreeMap::new();
    let mut used: HashSet<String> = HashSet::from([OMNIVOX.to_string()]);

    for id in evaluation.ids() {
        let points_cell = points_name(id);
        if let Some(cell) = raw.get(&points_cell) {
            if let Some(grade) = cell.number(&points_cell)? {
                grades.insert(id.to_string(), grade);
            }
        }
        let comment_cell = comment_name(id);
        if let Some(comment) = raw.get(&comment_cell).and_then(CellValue::text) {
            comments.insert(id.to_string(), comment);
        }
        used.insert(points_cell);
        used.insert(comment_cell);
    }

    for name in raw.keys().filter(|name| !used.contains(*name)) {
        debug!(omnivox = omnivox_code, cell = %name, "ignoring cell matching no entity");
    }

    Ok((grades, comments))
}

fn check_bounds(
    evaluation: &Evaluation,
    options: &IngestOptions,
    checked: &mut Checked<GradeSheet>,
) -> Result<()> {
    for id in evaluation.ids() {
        let (Some(entity), Some(grade)) = (evaluation.entity(id), checked.value.grade(id)) else {
            continue;
        };
        let points = entity.points();
        if grade < Decimal::ZERO || (grade > points && !options.allow_overshoot) {
            return Err(ConfigError::GradeOutOfRange {
                entity: id.to_string(),
                grade,
                points,
            });
        }
        if grade > points {
            checked.warnings.push(GradeWarning::Overshoot {
                omnivox_code: checked.value.omnivox_code.clone(),
                entity: id.to_string(),
                grade,
                points,
            });
        }
    }
    Ok(())
}

fn check_criteria(evaluation: &Evaluation, checked: &mut Checked<GradeSheet>) {
    for criterion in evaluation.criteria() {
        let Some(grade) = checked.value.grade(criterion.id()) else {
            continue;
        };
        let indicators: Decimal = criterion
            .indicators()
            .iter()
            .filter_map(|i| checked.value.grade(i.id()))
            .sum();
        if indicators > grade {
            checked.warnings.push(GradeWarning::IndicatorsAboveCriterion {
                omnivox_code: checked.value.omnivox_code.clone(),
                criterion: criterion.id().to_string(),
                indicators,
                grade,
            });
        }
    }
}

fn check_descriptors(
    evaluation: &Evaluation,
    options: &IngestOptions,
    sheet: &GradeSheet,
) -> Result<()> {
    let levels = evaluation.grade_levels();
    for indicator in evaluation.indicators() {
        let Some(grade) = sheet.grade(indicator.id()) else {
            continue;
        };
        let entity = EntityRef::Indicator(indicator);
        let percentage = percentage_of(grade, entity.points(), options.percentage_quantum);
        let index = levels.index_of(percentage);
        if indicator.descriptor(index).is_none() {
            let level = levels.get(index).map(|l| l.name()).unwrap_or_default();
            return Err(ConfigError::GradeAtNullDescriptor {
                indicator: indicator.id().to_string(),
                level: level.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
