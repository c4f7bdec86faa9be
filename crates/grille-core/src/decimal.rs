//! Exact decimal arithmetic for points and grades
//!
//! Points and grades are [`Decimal`] values on an explicit quantum grid.
//! Rounding is half-up (midpoint away from zero).

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Default quantum for percentages (four decimal places of a unit ratio)
pub const PERCENTAGE_QUANTUM: Decimal = Decimal::from_parts(1, 0, 0, false, 4);

/// Round `x` to the nearest multiple of `quantum`, midpoints away from zero.
///
/// A zero quantum leaves `x` unchanged.
pub fn round_to_quantum(x: Decimal, quantum: Decimal) -> Decimal {
    if quantum.is_zero() {
        return x;
    }
    (x / quantum).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero) * quantum
}

/// Round `x` to `places` decimal places, midpoints away from zero.
pub fn round_dp(x: Decimal, places: u32) -> Decimal {
    x.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// True when `x / quantum` is integral.
pub fn is_multiple_of(x: Decimal, quantum: Decimal) -> bool {
    if quantum.is_zero() {
        return x.is_zero();
    }
    (x % quantum).is_zero()
}

/// Partition `total` into `n` multiples of `quantum` differing by at most one
/// quantum and summing exactly to `total`.
///
/// The parts receiving an extra quantum are the first ones. When `total` is
/// off the quantum grid, the rounding residue is carried by the first (largest)
/// part so the sum stays exact.
pub fn split(total: Decimal, n: usize, quantum: Decimal) -> Vec<Decimal> {
    if n == 0 {
        return Vec::new();
    }
    if quantum.is_zero() {
        let mut parts = vec![total / Decimal::from(n); n];
        let drift = total - parts.iter().copied().sum::<Decimal>();
        parts[0] += drift;
        return parts;
    }

    let units = (total / quantum).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let count = Decimal::from(n);
    let base = (units / count).floor();
    let extra = (units - base * count).to_usize().unwrap_or(0);

    let mut parts: Vec<Decimal> = (0..n)
        .map(|i| {
            if i < extra {
                (base + Decimal::ONE) * quantum
            } else {
                base * quantum
            }
        })
        .collect();

    let residue = total - units * quantum;
    if !residue.is_zero() {
        parts[0] += residue;
    }
    parts
}

/// Clamp a ratio into `[0, 1]`.
pub fn clamp_unit(x: Decimal) -> Decimal {
    x.clamp(Decimal::ZERO, Decimal::ONE)
}

/// Parse a decimal typed by a human: surrounding blanks are ignored and a
/// decimal comma is accepted.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim().replace(',', ".");
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
