//! Grade levels: named percentage bands, best first

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::Result;
use crate::validate;

/// A named percentage band such as "Excellent: 100-85%"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeLevel {
    name: String,
    #[serde(rename = "maximum")]
    max_percent: Decimal,
    #[serde(rename = "minimum")]
    min_percent: Decimal,
}

impl GradeLevel {
    pub(crate) fn new(name: impl Into<String>, max_percent: Decimal, min_percent: Decimal) -> Self {
        Self {
            name: name.into(),
            max_percent,
            min_percent,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Upper bound of the band, in percent
    pub fn max_percent(&self) -> Decimal {
        self.max_percent
    }

    /// Lower bound of the band, in percent
    pub fn min_percent(&self) -> Decimal {
        self.min_percent
    }
}

/// Validated, descending sequence of grade levels
///
/// The first level tops out at 100%, the last one bottoms out at 0%, and
/// each level sits entirely below its predecessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GradeLevels(Vec<GradeLevel>);

impl GradeLevels {
    pub(crate) fn new(levels: Vec<GradeLevel>) -> Result<Self> {
        validate::grade_levels(&levels)?;
        Ok(Self(levels))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GradeLevel> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&GradeLevel> {
        self.0.get(index)
    }

    pub fn as_slice(&self) -> &[GradeLevel] {
        &self.0
    }

    /// Index of the level a unit `percentage` (0..=1) falls into.
    ///
    /// The first level whose minimum is at or below `percentage * 100` wins,
    /// so a value sitting exactly on a boundary resolves to the higher level.
    /// Anything below every minimum lands in the lowest level.
    pub fn index_of(&self, percentage: Decimal) -> usize {
        let percent = percentage * Decimal::ONE_HUNDRED;
        self.0
            .iter()
            .position(|level| level.min_percent <= percent)
            .unwrap_or(self.0.len() - 1)
    }

    /// The level a unit `percentage` (0..=1) falls into.
    pub fn level_of(&self, percentage: Decimal) -> &GradeLevel {
        &self.0[self.index_of(percentage)]
    }
}

impl<'a> IntoIterator for &'a GradeLevels {
    type Item = &'a GradeLevel;
    type IntoIter = std::slice::Iter<'a, GradeLevel>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
