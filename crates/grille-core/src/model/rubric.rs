//! The rubric: evaluation, renderer format and cohort
//!
//! This is the surface renderers consume. Values are exposed through
//! queries only, so callers never learn whether a number was authored or
//! inferred.

use rust_decimal::Decimal;
use serde::Serialize;

use super::evaluation::{Criterion, Evaluation, Indicator};
use super::levels::GradeLevels;
use super::student::{Student, Students};
use crate::decimal::PERCENTAGE_QUANTUM;
use crate::error::{ConfigError, Result};
use crate::gradesheet::GradeSheet;
use crate::rollup::Entity;

/// A validated evaluation together with its renderer format and cohort
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rubric {
    evaluation: Evaluation,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<serde_yaml::Value>,
    #[serde(skip_serializing_if = "Students::is_empty")]
    students: Students,
}

impl Rubric {
    pub(crate) fn new(
        evaluation: Evaluation,
        format: Option<serde_yaml::Value>,
        students: Students,
    ) -> Self {
        Self {
            evaluation,
            format,
            students,
        }
    }

    pub fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }

    /// Renderer settings, passed through untouched
    pub fn format(&self) -> Option<&serde_yaml::Value> {
        self.format.as_ref()
    }

    pub fn students(&self) -> &Students {
        &self.students
    }

    pub fn title(&self) -> &str {
        self.evaluation.name()
    }

    pub fn grade_levels(&self) -> &GradeLevels {
        self.evaluation.grade_levels()
    }

    pub fn criteria(&self) -> &[Criterion] {
        self.evaluation.criteria()
    }

    pub fn indicators(&self) -> Vec<&Indicator> {
        self.evaluation.indicators().collect()
    }

    /// Points of the entity named `id`.
    pub fn points(&self, id: &str) -> Option<Decimal> {
        self.evaluation.entity(id).map(|e| e.points())
    }

    /// Grade of entity `id` in `sheet`, rounded to `precision` places.
    pub fn grade(&self, sheet: &GradeSheet, id: &str, precision: u32) -> Option<Decimal> {
        let entity = self.evaluation.entity(id)?;
        sheet.grade_of(&entity, precision)
    }

    /// Unit percentage of entity `id` in `sheet`, on the default quantum.
    pub fn percentage(&self, sheet: &GradeSheet, id: &str) -> Option<Decimal> {
        let entity = self.evaluation.entity(id)?;
        sheet.percentage_of(&entity, PERCENTAGE_QUANTUM)
    }

    /// Descriptor of `indicator` at the grade level of index `level_index`.
    pub fn descriptor_for<'a>(&self, indicator: &'a Indicator, level_index: usize) -> Option<&'a str> {
        indicator.descriptor(level_index)
    }

    pub fn student_by_omnivox(&self, code: &str) -> Option<&Student> {
        self.students.by_omnivox(code)
    }

    pub fn team_mates(&self, student: &Student) -> Vec<&Student> {
        self.students.team_mates(student)
    }

    /// The grade sheet that applies to `student`: their own, or else the one
    /// of their team's reference member.
    pub fn sheet_for<'s>(&self, student: &Student, sheets: &'s [GradeSheet]) -> Option<&'s GradeSheet> {
        let own = sheets
            .iter()
            .find(|s| s.omnivox_code() == student.omnivox_code());
        if own.is_some() {
            return own;
        }
        let reference = self.students.team_reference(student.team()?)?;
        sheets
            .iter()
            .find(|s| s.omnivox_code() == reference.omnivox_code())
    }

    /// Canonical-keyed YAML with every inferred value written out.
    ///
    /// Loading the result back yields an equal rubric.
    pub fn to_canonical_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(ConfigError::from)
    }
}
