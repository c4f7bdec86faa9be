//! Roll-up queries over a grade sheet
//!
//! Grades are looked up by entity identifier; percentages are unit ratios
//! clamped into `[0, 1]` and rounded on a quantum.

use rust_decimal::Decimal;

use crate::decimal::{clamp_unit, round_dp, round_to_quantum};
use crate::gradesheet::GradeSheet;
use crate::model::{Criterion, EntityRef, Evaluation, GradeLevel, GradeLevels, Indicator};

/// Anything that can be graded: it has an identifier and a points value
pub trait Entity {
    fn id(&self) -> &str;
    fn points(&self) -> Decimal;
}

impl Entity for Evaluation {
    fn id(&self) -> &str {
        Evaluation::id(self)
    }

    fn points(&self) -> Decimal {
        self.points_total()
    }
}

impl Entity for Criterion {
    fn id(&self) -> &str {
        Criterion::id(self)
    }

    fn points(&self) -> Decimal {
        self.points_total()
    }
}

impl Entity for Indicator {
    fn id(&self) -> &str {
        Indicator::id(self)
    }

    fn points(&self) -> Decimal {
        Indicator::points(self)
    }
}

impl Entity for EntityRef<'_> {
    fn id(&self) -> &str {
        match self {
            EntityRef::Evaluation(e) => Evaluation::id(e),
            EntityRef::Criterion(c) => Criterion::id(c),
            EntityRef::Indicator(i) => Indicator::id(i),
        }
    }

    fn points(&self) -> Decimal {
        match self {
            EntityRef::Evaluation(e) => e.points_total(),
            EntityRef::Criterion(c) => c.points_total(),
            EntityRef::Indicator(i) => Indicator::points(i),
        }
    }
}

/// `clamp(grade / points, 0, 1)` rounded to `quantum`.
pub fn percentage_of(grade: Decimal, points: Decimal, quantum: Decimal) -> Decimal {
    if points <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round_to_quantum(clamp_unit(grade / points), quantum)
}

impl GradeSheet {
    /// Grade of `entity` rounded to `precision` places, if the sheet has one.
    pub fn grade_of<E: Entity + ?Sized>(&self, entity: &E, precision: u32) -> Option<Decimal> {
        self.grade(entity.id()).map(|g| round_dp(g, precision))
    }

    /// Unit percentage of `entity` on `quantum`, if the sheet grades it.
    pub fn percentage_of<E: Entity + ?Sized>(&self, entity: &E, quantum: Decimal) -> Option<Decimal> {
        self.grade(entity.id())
            .map(|g| percentage_of(g, entity.points(), quantum))
    }

    /// Grade level reached on `entity`, if the sheet grades it.
    pub fn level_of<'l, E: Entity + ?Sized>(
        &self,
        entity: &E,
        levels: &'l GradeLevels,
        quantum: Decimal,
    ) -> Option<&'l GradeLevel> {
        self.percentage_of(entity, quantum)
            .map(|p| levels.level_of(p))
    }
}
