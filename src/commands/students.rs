//! `grille students` command - list the cohort

use crate::cli::{OutputFormat, StudentsArgs};
use crate::commands::dispatch::CommandContext;
use grille_core::error::Result;

/// Execute the students command
pub fn execute(ctx: &CommandContext, args: &StudentsArgs) -> Result<()> {
    let rubric = ctx.load_rubric(&args.config)?;
    let students = rubric.students();

    match ctx.format() {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(students)?),
        OutputFormat::Human => {
            if students.is_empty() {
                if !ctx.cli.quiet {
                    println!("No students.");
                }
                return Ok(());
            }
            for student in students {
                let team = match (student.team(), student.is_team_reference()) {
                    (Some(team), true) => format!("  team {} (reference)", team),
                    (Some(team), false) => format!("  team {}", team),
                    (None, _) => String::new(),
                };
                println!(
                    "{}  {:<12} {}{}",
                    student.omnivox_code(),
                    student.alias(),
                    student.full_name(),
                    team
                );
            }
        }
    }

    Ok(())
}
