//! CLI commands for grille

pub mod check;
pub mod dispatch;
pub mod export;
pub mod grade;
pub mod show;
pub mod students;
