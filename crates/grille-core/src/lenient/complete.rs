//! Turning a lenient evaluation into a validated one

use rust_decimal::Decimal;
use tracing::debug;

use super::{LenientCriterion, LenientEvaluation, LenientIndicator};
use crate::bail_bad_type;
use crate::error::{ConfigError, Result};
use crate::id::{derived_criterion_id, derived_indicator_id, DEFAULT_EVALUATION_ID};
use crate::inference::points::{self, CriterionPoints, IndicatorPoints, PointsTable};
use crate::model::evaluation::Precision;
use crate::model::{Criterion, Evaluation, GradeLevel, GradeLevels, Indicator};
use crate::validate;

/// Default quantum of the points-inference engine
pub const DEFAULT_POINTS_INFERENCE_STEP: Decimal = Decimal::ONE;

/// Default number of decimal places of a reported evaluation grade
pub const DEFAULT_POINTS_TOTAL_PRECISION: u32 = 0;

/// Default number of decimal places of an inferred grade
pub const DEFAULT_GRADE_PRECISION: u32 = 2;

fn required_text(value: &str, field: &str, path: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::missing_field(field, path));
    }
    Ok(value.to_string())
}

fn optional_id(value: Option<&String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl LenientEvaluation {
    /// Derive missing identifiers, infer missing points and validate the
    /// result.
    pub fn complete(self) -> Result<Evaluation> {
        let path = "$.evaluation";
        let name = required_text(&self.name, "name", path)?;

        let step = self
            .points_inference_step
            .unwrap_or(DEFAULT_POINTS_INFERENCE_STEP);
        if step <= Decimal::ZERO {
            bail_bad_type!(
                format!("{}.points_inference_step", path),
                format!("the inference step must be strictly positive, found {}", step)
            );
        }
        let precision = Precision {
            points_inference_step: step,
            points_total_precision: self
                .points_total_precision
                .unwrap_or(DEFAULT_POINTS_TOTAL_PRECISION),
            grade_precision: self.grade_precision.unwrap_or(DEFAULT_GRADE_PRECISION),
        };

        let levels = self
            .grade_levels
            .into_iter()
            .map(|level| GradeLevel::new(level.name.trim(), level.maximum, level.minimum))
            .collect();
        let levels = GradeLevels::new(levels)?;

        if self.criteria.is_empty() {
            return Err(ConfigError::missing_field("criteria", path));
        }

        let id = optional_id(self.id.as_ref()).unwrap_or_else(|| DEFAULT_EVALUATION_ID.to_string());

        // Authored ids are checked before any id is derived from them.
        let explicit: Vec<String> = self
            .criteria
            .iter()
            .flat_map(|c| {
                std::iter::once(c.id.as_ref())
                    .chain(c.indicators.iter().map(|i| i.id.as_ref()))
                    .filter_map(optional_id)
            })
            .collect();
        validate::identifiers(
            std::iter::once(id.as_str()).chain(explicit.iter().map(String::as_str)),
        )?;

        let table = points_table(&id, self.points_total, &self.criteria)?;
        validate::identifiers(
            std::iter::once(table.id.as_str()).chain(table.criteria.iter().flat_map(|c| {
                std::iter::once(c.id.as_str()).chain(c.indicators.iter().map(|i| i.id.as_str()))
            })),
        )?;

        let ids: Vec<(String, Vec<String>)> = table
            .criteria
            .iter()
            .map(|c| (c.id.clone(), c.indicators.iter().map(|i| i.id.clone()).collect()))
            .collect();
        let points = points::infer(table, step)?;

        let mut criteria = Vec::with_capacity(self.criteria.len());
        for (index, ((lenient, (criterion_id, indicator_ids)), allocated)) in self
            .criteria
            .into_iter()
            .zip(ids)
            .zip(points.criteria)
            .enumerate()
        {
            let criterion_path = format!("{}.criteria[{}]", path, index);
            let criterion_name = required_text(&lenient.name, "name", &criterion_path)?;

            let mut indicators = Vec::with_capacity(lenient.indicators.len());
            for (position, ((indicator, indicator_id), points)) in lenient
                .indicators
                .into_iter()
                .zip(indicator_ids)
                .zip(allocated.indicators)
                .enumerate()
            {
                indicators.push(complete_indicator(
                    indicator,
                    indicator_id,
                    points,
                    &levels,
                    &format!("{}.indicators[{}]", criterion_path, position),
                )?);
            }

            criteria.push(Criterion::new(criterion_id, criterion_name, indicators));
        }

        let evaluation = Evaluation::new(id, name, precision, levels, criteria);
        debug!(
            evaluation = evaluation.id(),
            points_total = %evaluation.points_total(),
            criteria = evaluation.criteria().len(),
            "evaluation completed"
        );
        Ok(evaluation)
    }
}

fn points_table(
    id: &str,
    total: Option<Decimal>,
    criteria: &[LenientCriterion],
) -> Result<PointsTable> {
    let mut table = PointsTable {
        id: id.to_string(),
        total,
        criteria: Vec::with_capacity(criteria.len()),
    };

    for (index, criterion) in criteria.iter().enumerate() {
        if criterion.indicators.is_empty() {
            return Err(ConfigError::missing_field(
                "indicators",
                format!("$.evaluation.criteria[{}]", index),
            ));
        }
        let criterion_id =
            optional_id(criterion.id.as_ref()).unwrap_or_else(|| derived_criterion_id(index));
        let indicators = criterion
            .indicators
            .iter()
            .enumerate()
            .map(|(position, indicator)| IndicatorPoints {
                id: optional_id(indicator.id.as_ref())
                    .unwrap_or_else(|| derived_indicator_id(&criterion_id, position)),
                points: indicator.points,
            })
            .collect();
        table.criteria.push(CriterionPoints {
            id: criterion_id,
            total: criterion.points_total,
            indicators,
        });
    }

    Ok(table)
}

fn complete_indicator(
    indicator: LenientIndicator,
    id: String,
    points: Decimal,
    levels: &GradeLevels,
    path: &str,
) -> Result<Indicator> {
    let name = required_text(&indicator.name, "name", path)?;
    validate::descriptors(&id, &indicator.descriptors, levels)?;
    Ok(Indicator::new(id, name, points, indicator.descriptors))
}
