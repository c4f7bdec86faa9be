//! Evaluation, criteria and indicators
//!
//! These are the validated, read-only forms. They are only built by
//! [`LenientEvaluation::complete`](crate::lenient::LenientEvaluation::complete),
//! which guarantees the invariants below:
//! - every indicator has strictly positive points and one descriptor slot per
//!   grade level
//! - a criterion's total is the sum of its indicators' points
//! - the evaluation's total is the sum of its criteria's totals
//! - identifiers are safe and pairwise distinct

use rust_decimal::Decimal;
use serde::Serialize;

use super::levels::GradeLevels;

/// A sub-criterion carrying a raw grade and one descriptor per grade level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Indicator {
    id: String,
    name: String,
    points: Decimal,
    descriptors: Vec<Option<String>>,
}

impl Indicator {
    pub(crate) fn new(
        id: String,
        name: String,
        points: Decimal,
        descriptors: Vec<Option<String>>,
    ) -> Self {
        Self {
            id,
            name,
            points,
            descriptors,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> Decimal {
        self.points
    }

    pub fn descriptors(&self) -> &[Option<String>] {
        &self.descriptors
    }

    /// Descriptor at a grade level; `None` when the level does not apply.
    pub fn descriptor(&self, level_index: usize) -> Option<&str> {
        self.descriptors
            .get(level_index)
            .and_then(|d| d.as_deref())
    }
}

/// A major scoring axis made of indicators
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Criterion {
    id: String,
    name: String,
    points_total: Decimal,
    indicators: Vec<Indicator>,
}

impl Criterion {
    pub(crate) fn new(id: String, name: String, indicators: Vec<Indicator>) -> Self {
        let points_total = indicators.iter().map(Indicator::points).sum();
        Self {
            id,
            name,
            points_total,
            indicators,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points_total(&self) -> Decimal {
        self.points_total
    }

    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }
}

/// A graded assessment event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    name: String,
    id: String,
    points_total: Decimal,
    points_inference_step: Decimal,
    points_total_precision: u32,
    grade_precision: u32,
    grade_levels: GradeLevels,
    criteria: Vec<Criterion>,
}

/// Numeric settings of an evaluation that are not derived from its tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Precision {
    pub points_inference_step: Decimal,
    pub points_total_precision: u32,
    pub grade_precision: u32,
}

impl Evaluation {
    pub(crate) fn new(
        id: String,
        name: String,
        precision: Precision,
        grade_levels: GradeLevels,
        criteria: Vec<Criterion>,
    ) -> Self {
        let points_total = criteria.iter().map(Criterion::points_total).sum();
        Self {
            name,
            id,
            points_total,
            points_inference_step: precision.points_inference_step,
            points_total_precision: precision.points_total_precision,
            grade_precision: precision.grade_precision,
            grade_levels,
            criteria,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points_total(&self) -> Decimal {
        self.points_total
    }

    /// Quantum on which inferred points are distributed
    pub fn points_inference_step(&self) -> Decimal {
        self.points_inference_step
    }

    /// Decimal places used when reporting the evaluation grade
    pub fn points_total_precision(&self) -> u32 {
        self.points_total_precision
    }

    /// Decimal places grades are rounded to by grade inference
    pub fn grade_precision(&self) -> u32 {
        self.grade_precision
    }

    pub fn grade_levels(&self) -> &GradeLevels {
        &self.grade_levels
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// All indicators, criterion by criterion, in declared order.
    pub fn indicators(&self) -> impl Iterator<Item = &Indicator> {
        self.criteria.iter().flat_map(|c| c.indicators.iter())
    }

    /// Every identifier in the evaluation: itself, then each criterion
    /// followed by its indicators.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids = vec![self.id.as_str()];
        for criterion in &self.criteria {
            ids.push(criterion.id());
            ids.extend(criterion.indicators.iter().map(Indicator::id));
        }
        ids
    }

    pub fn criterion(&self, id: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.id == id)
    }

    pub fn indicator(&self, id: &str) -> Option<&Indicator> {
        self.indicators().find(|i| i.id == id)
    }

    /// Look up any entity of the evaluation by identifier.
    pub fn entity(&self, id: &str) -> Option<EntityRef<'_>> {
        if id == self.id {
            return Some(EntityRef::Evaluation(self));
        }
        if let Some(criterion) = self.criterion(id) {
            return Some(EntityRef::Criterion(criterion));
        }
        self.indicator(id).map(EntityRef::Indicator)
    }
}

/// Borrowed reference to one entity of an evaluation
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Evaluation(&'a Evaluation),
    Criterion(&'a Criterion),
    Indicator(&'a Indicator),
}
