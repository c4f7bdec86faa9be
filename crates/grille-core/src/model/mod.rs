//! Validated domain model
//!
//! Everything here is read-only once built: fields are private, there are no
//! setters, and constructors are only reachable from the loading pipeline.

pub mod evaluation;
pub mod levels;
pub mod rubric;
pub mod student;

pub use evaluation::{Criterion, EntityRef, Evaluation, Indicator};
pub use levels::{GradeLevel, GradeLevels};
pub use rubric::Rubric;
pub use student::{Student, Students};
