//! Grade inference
//!
//! Completes the grades of one student from whatever the grader entered:
//! - S1: only the evaluation grade is given; it is spread over criteria and
//!   indicators in proportion to their points.
//! - S2: otherwise each criterion is completed on its own, from its
//!   indicators or by spreading its own grade, and a missing evaluation grade
//!   is the sum of the criteria.
//!
//! Every grade leaving the engine is rounded to the evaluation's
//! `grade_precision`. Spread grades always sum exactly to their parent: the
//! rounding residue goes to the first child.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::decimal::round_dp;
use crate::error::{ConfigError, Result};
use crate::model::{Criterion, Evaluation};

/// Grades keyed by entity identifier
pub type Grades = BTreeMap<String, Decimal>;

/// Complete a partial set of grades; entries naming no entity are dropped.
pub fn infer_grades(evaluation: &Evaluation, partial: &Grades) -> Result<Grades> {
    let precision = evaluation.grade_precision();
    let known = |id: &str| partial.get(id).map(|g| round_dp(*g, precision));

    let mut grades = Grades::new();
    let evaluation_grade = known(evaluation.id());

    let only_evaluation = evaluation.criteria().iter().all(|c| {
        known(c.id()).is_none() && c.indicators().iter().all(|i| known(i.id()).is_none())
    });

    match evaluation_grade {
        Some(total) if only_evaluation => {
            debug!(evaluation = evaluation.id(), %total, "spreading evaluation grade");
            let weights: Vec<Decimal> = evaluation
                .criteria()
                .iter()
                .map(Criterion::points_total)
                .collect();
            let parts = spread(total, &weights, precision);
            for (criterion, grade) in evaluation.criteria().iter().zip(parts) {
                spread_criterion(criterion, grade, precision, &mut grades);
            }
            grades.insert(evaluation.id().to_string(), total);
        }
        _ => {
            let mut sum = Decimal::ZERO;
            for criterion in evaluation.criteria() {
                sum += complete_criterion(criterion, &known, precision, &mut grades)?;
            }
            let total = evaluation_grade.unwrap_or(sum);
            grades.insert(evaluation.id().to_string(), round_dp(total, precision));
        }
    }

    Ok(grades)
}

fn spread_criterion(criterion: &Criterion, grade: Decimal, precision: u32, grades: &mut Grades) {
    let weights: Vec<Decimal> = criterion.indicators().iter().map(|i| i.points()).collect();
    let parts = spread(grade, &weights, precision);
    for (indicator, part) in criterion.indicators().iter().zip(parts) {
        grades.insert(indicator.id().to_string(), part);
    }
    grades.insert(criterion.id().to_string(), grade);
}

/// S2 for one criterion; returns the criterion grade.
fn complete_criterion(
    criterion: &Criterion,
    known: &impl Fn(&str) -> Option<Decimal>,
    precision: u32,
    grades: &mut Grades,
) -> Result<Decimal> {
    let label = format!("criterion `{}`", criterion.id());
    let indicator_grades: Vec<Option<Decimal>> =
        criterion.indicators().iter().map(|i| known(i.id())).collect();
    let set = indicator_grades.iter().filter(|g| g.is_some()).count();

    match (known(criterion.id()), set) {
        (Some(grade), 0) => {
            trace!(criterion = criterion.id(), %grade, "spreading criterion grade");
            spread_criterion(criterion, grade, precision, grades);
            Ok(grade)
        }
        (None, 0) => Err(ConfigError::underspecified(
            label,
            "neither the criterion nor its indicators are graded",
        )),
        (explicit, n) if n == indicator_grades.len() => {
            let mut sum = Decimal::ZERO;
            for (indicator, grade) in criterion.indicators().iter().zip(&indicator_grades) {
                let grade = grade.unwrap_or_default();
                sum += grade;
                grades.insert(indicator.id().to_string(), grade);
            }
            let grade = explicit.unwrap_or_else(|| round_dp(sum, precision));
            grades.insert(criterion.id().to_string(), grade);
            Ok(grade)
        }
        _ => {
            let missing = criterion
                .indicators()
                .iter()
                .zip(&indicator_grades)
                .find(|(_, g)| g.is_none())
                .map(|(i, _)| i.id())
                .unwrap_or_default();
            Err(ConfigError::underspecified(
                label,
                format!("indicator `{}` is not graded while others are", missing),
            ))
        }
    }
}

/// Split `total` in proportion to `weights`, each part rounded to
/// `precision` places, the first part absorbing the rounding residue.
pub fn spread(total: Decimal, weights: &[Decimal], precision: u32) -> Vec<Decimal> {
    let sum: Decimal = weights.iter().copied().sum();
    if weights.is_empty() || sum.is_zero() {
        return vec![Decimal::ZERO; weights.len()];
    }
    let mut parts: Vec<Decimal> = weights
        .iter()
        .map(|w| round_dp(total * *w / sum, precision))
        .collect();
    let residue = total - parts.iter().copied().sum::<Decimal>();
    parts[0] += residue;
    parts
}
