//! Reports built from validated grade sheets
//!
//! - the grade-upload sheet: one row per student with the rounded evaluation
//!   grade, team members resolved through their reference's sheet
//! - the feedback report: every entity's grade, percentage, level, descriptor
//!   and comment for one sheet

use std::io::Write;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{ConfigError, Result};
use crate::gradesheet::GradeSheet;
use crate::model::{Criterion, Indicator, Rubric};

/// One line of the grade-upload sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadRow {
    pub omnivox_code: String,
    pub last_name: String,
    pub first_name: String,
    /// Evaluation grade on `points_total_precision` places; `None` when the
    /// student has no sheet
    pub grade: Option<Decimal>,
}

/// Upload rows for the whole cohort, or for the sheets alone when the rubric
/// declares no students.
pub fn upload_rows(rubric: &Rubric, sheets: &[GradeSheet]) -> Vec<UploadRow> {
    let evaluation = rubric.evaluation();
    let precision = evaluation.points_total_precision();

    if rubric.students().is_empty() {
        return sheets
            .iter()
            .map(|sheet| UploadRow {
                omnivox_code: sheet.omnivox_code().to_string(),
                last_name: String::new(),
                first_name: String::new(),
                grade: sheet.grade_of(evaluation, precision),
            })
            .collect();
    }

    rubric
        .students()
        .iter()
        .map(|student| UploadRow {
            omnivox_code: student.omnivox_code().to_string(),
            last_name: student.last_name().to_string(),
            first_name: student.first_name().to_string(),
            grade: rubric
                .sheet_for(student, sheets)
                .and_then(|sheet| sheet.grade_of(evaluation, precision)),
        })
        .collect()
}

/// Write upload rows as delimited text with a header line.
pub fn write_upload<W: Write>(rows: &[UploadRow], writer: W, delimiter: u8) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    csv.write_record(["omnivox_code", "last_name", "first_name", "grade"])?;
    for row in rows {
        let grade = row.grade.map(|g| g.to_string()).unwrap_or_default();
        csv.write_record([
            row.omnivox_code.as_str(),
            row.last_name.as_str(),
            row.first_name.as_str(),
            grade.as_str(),
        ])?;
    }
    csv.flush().map_err(|e| ConfigError::io("upload sheet", e))?;
    Ok(())
}

/// Feedback on one indicator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndicatorFeedback {
    pub id: String,
    pub name: String,
    pub points: Decimal,
    pub grade: Option<Decimal>,
    pub percentage: Option<Decimal>,
    pub level: Option<String>,
    pub descriptor: Option<String>,
    pub comment: Option<String>,
}

/// Feedback on one criterion and its indicators
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriterionFeedback {
    pub id: String,
    pub name: String,
    pub points: Decimal,
    pub grade: Option<Decimal>,
    pub percentage: Option<Decimal>,
    pub level: Option<String>,
    pub comment: Option<String>,
    pub indicators: Vec<IndicatorFeedback>,
}

/// Feedback on a whole sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackReport {
    pub omnivox_code: String,
    pub student: Option<String>,
    pub points: Decimal,
    pub grade: Option<Decimal>,
    pub percentage: Option<Decimal>,
    pub level: Option<String>,
    pub comment: Option<String>,
    pub criteria: Vec<CriterionFeedback>,
}

/// Build the feedback report of `sheet`, percentages on `quantum`.
pub fn feedback_report(rubric: &Rubric, sheet: &GradeSheet, quantum: Decimal) -> FeedbackReport {
    let evaluation = rubric.evaluation();
    let levels = rubric.grade_levels();
    let level_name = |percentage: Option<Decimal>| {
        percentage.map(|p| levels.level_of(p).name().to_string())
    };

    let indicator_feedback = |indicator: &Indicator| {
        let grade = sheet.grade_of(indicator, evaluation.grade_precision());
        let percentage = sheet.percentage_of(indicator, quantum);
        IndicatorFeedback {
            id: indicator.id().to_string(),
            name: indicator.name().to_string(),
            points: indicator.points(),
            grade,
            percentage,
            level: level_name(percentage),
            descriptor: percentage
                .and_then(|p| rubric.descriptor_for(indicator, levels.index_of(p)))
                .map(str::to_string),
            comment: sheet.comment(indicator.id()).map(str::to_string),
        }
    };

    let criterion_feedback = |criterion: &Criterion| {
        let percentage = sheet.percentage_of(criterion, quantum);
        CriterionFeedback {
            id: criterion.id().to_string(),
            name: criterion.name().to_string(),
            points: criterion.points_total(),
            grade: sheet.grade_of(criterion, evaluation.grade_precision()),
            percentage,
            level: level_name(percentage),
            comment: sheet.comment(criterion.id()).map(str::to_string),
            indicators: criterion.indicators().iter().map(&indicator_feedback).collect(),
        }
    };

    let percentage = sheet.percentage_of(evaluation, quantum);
    FeedbackReport {
        omnivox_code: sheet.omnivox_code().to_string(),
        student: rubric
            .student_by_omnivox(sheet.omnivox_code())
            .map(|s| s.full_name()),
        points: evaluation.points_total(),
        grade: sheet.grade_of(evaluation, evaluation.points_total_precision()),
        percentage,
        level: level_name(percentage),
        comment: sheet.comment(evaluation.id()).map(str::to_string),
        criteria: evaluation.criteria().iter().map(criterion_feedback).collect(),
    }
}
