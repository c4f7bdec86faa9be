mod check;
mod export;
mod grade;
mod settings;
mod show;
mod students;
pub mod support;
