//! Points inference
//!
//! Completes a partially specified allocation of points by running three
//! propagation rules to a fixed point:
//!
//! - R1: a criterion without a total gets the sum of its indicators once all
//!   of them are known.
//! - R2: a criterion with a total hands what is left of it to its unknown
//!   indicators, split on the inference step.
//! - R3: the same pair of rules between the evaluation total and the
//!   criteria totals.
//!
//! Within a pass, R1 and R2 run for every criterion before R3, so explicit
//! indicator points win over an evaluation-wide redistribution. Every rule
//! application fills at least one unknown, hence the loop stops after at most
//! as many passes as there are unknowns.

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::decimal::split;
use crate::error::{ConfigError, Result};

/// Points of one indicator, possibly unknown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorPoints {
    pub id: String,
    pub points: Option<Decimal>,
}

/// Total of one criterion and points of its indicators, possibly unknown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriterionPoints {
    pub id: String,
    pub total: Option<Decimal>,
    pub indicators: Vec<IndicatorPoints>,
}

/// The whole allocation of an evaluation, possibly incomplete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsTable {
    pub id: String,
    pub total: Option<Decimal>,
    pub criteria: Vec<CriterionPoints>,
}

/// A criterion's completed allocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteCriterion {
    pub total: Decimal,
    pub indicators: Vec<Decimal>,
}

/// The completed allocation, in the same order as the input table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletePoints {
    pub total: Decimal,
    pub criteria: Vec<CompleteCriterion>,
}

/// Run the rules until nothing changes, then check every value is known and
/// strictly positive.
pub fn infer(mut table: PointsTable, step: Decimal) -> Result<CompletePoints> {
    let mut pass = 0usize;
    loop {
        pass += 1;
        let mut progress = false;

        for criterion in &mut table.criteria {
            progress |= criterion_from_indicators(criterion);
            progress |= indicators_from_criterion(criterion, step)?;
        }
        progress |= evaluation_and_criteria(&mut table, step)?;

        debug!(pass, progress, "points inference pass");
        if !progress {
            break;
        }
    }

    complete(table)
}

/// R1
fn criterion_from_indicators(criterion: &mut CriterionPoints) -> bool {
    let parts: Vec<Option<Decimal>> = criterion.indicators.iter().map(|i| i.points).collect();
    if fill_from_parts(&mut criterion.total, &parts) {
        trace!(criterion = %criterion.id, total = ?criterion.total, "R1: total from indicators");
        true
    } else {
        false
    }
}

/// R2
fn indicators_from_criterion(criterion: &mut CriterionPoints, step: Decimal) -> Result<bool> {
    let Some(total) = criterion.total else {
        return Ok(false);
    };
    let label = format!("criterion `{}`", criterion.id);
    let mut slots: Vec<&mut Option<Decimal>> = criterion
        .indicators
        .iter_mut()
        .map(|i| &mut i.points)
        .collect();
    let changed = distribute(&label, total, &mut slots, step)?;
    if changed {
        trace!(criterion = %criterion.id, %total, "R2: indicators from total");
    }
    Ok(changed)
}

/// R3
fn evaluation_and_criteria(table: &mut PointsTable, step: Decimal) -> Result<bool> {
    let totals: Vec<Option<Decimal>> = table.criteria.iter().map(|c| c.total).collect();
    if fill_from_parts(&mut table.total, &totals) {
        trace!(total = ?table.total, "R3: evaluation total from criteria");
        return Ok(true);
    }

    let Some(total) = table.total else {
        return Ok(false);
    };
    let label = format!("evaluation `{}`", table.id);
    let mut slots: Vec<&mut Option<Decimal>> =
        table.criteria.iter_mut().map(|c| &mut c.total).collect();
    let changed = distribute(&label, total, &mut slots, step)?;
    if changed {
        trace!(%total, "R3: criteria totals from evaluation total");
    }
    Ok(changed)
}

/// Set an unknown total to the sum of its parts once they are all known.
fn fill_from_parts(total: &mut Option<Decimal>, parts: &[Option<Decimal>]) -> bool {
    if total.is_some() {
        return false;
    }
    let sum: Option<Decimal> = parts.iter().copied().sum();
    match sum {
        Some(sum) => {
            *total = Some(sum);
            true
        }
        None => false,
    }
}

/// Hand what is left of `total` to the unknown slots, earliest first.
fn distribute(
    label: &str,
    total: Decimal,
    slots: &mut [&mut Option<Decimal>],
    step: Decimal,
) -> Result<bool> {
    let assigned: Decimal = slots.iter().filter_map(|s| **s).sum();
    let unknown = slots.iter().filter(|s| s.is_none()).count();

    if assigned > total {
        return Err(ConfigError::PointsOverflow {
            entity: label.to_string(),
            total,
            assigned,
        });
    }
    if assigned == total {
        return Ok(false);
    }
    if unknown == 0 {
        return Err(ConfigError::PointsUnderflow {
            entity: label.to_string(),
            total,
            assigned,
        });
    }

    let parts = split(total - assigned, unknown, step);
    for (slot, part) in slots.iter_mut().filter(|s| s.is_none()).zip(parts) {
        **slot = Some(part);
    }
    Ok(true)
}

fn positive(label: String, points: Decimal) -> Result<Decimal> {
    if points > Decimal::ZERO {
        Ok(points)
    } else {
        Err(ConfigError::bad_type(
            label,
            format!("points must be strictly positive, found {}", points),
        ))
    }
}

fn complete(table: PointsTable) -> Result<CompletePoints> {
    let mut criteria = Vec::with_capacity(table.criteria.len());

    for criterion in table.criteria {
        let label = format!("criterion `{}`", criterion.id);
        let total = criterion.total.ok_or_else(|| {
            ConfigError::underspecified(&label, "its points total could not be inferred")
        })?;
        let indicators = criterion
            .indicators
            .into_iter()
            .map(|indicator| {
                let label = format!("indicator `{}`", indicator.id);
                let points = indicator.points.ok_or_else(|| {
                    ConfigError::underspecified(&label, "its points could not be inferred")
                })?;
                positive(label, points)
            })
            .collect::<Result<Vec<_>>>()?;
        let total = positive(label, total)?;
        criteria.push(CompleteCriterion { total, indicators });
    }

    let label = format!("evaluation `{}`", table.id);
    let total = table.total.ok_or_else(|| {
        ConfigError::underspecified(&label, "its points total could not be inferred")
    })?;

    Ok(CompletePoints {
        total: positive(label, total)?,
        criteria,
    })
}
