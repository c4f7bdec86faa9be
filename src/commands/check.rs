//! `grille check` command - load and validate a rubric

use crate::cli::{CheckArgs, OutputFormat};
use crate::commands::dispatch::CommandContext;
use grille_core::error::Result;
use grille_core::model::Rubric;

/// Execute the check command
pub fn execute(ctx: &CommandContext, args: &CheckArgs) -> Result<()> {
    let rubric = ctx.load_rubric(&args.config)?;

    match ctx.format() {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary_json(&rubric))?);
        }
        OutputFormat::Human => {
            if !ctx.cli.quiet {
                print_summary(&rubric);
            }
        }
    }

    Ok(())
}

fn summary_json(rubric: &Rubric) -> serde_json::Value {
    let evaluation = rubric.evaluation();
    serde_json::json!({
        "status": "ok",
        "id": evaluation.id(),
        "title": rubric.title(),
        "points_total": evaluation.points_total(),
        "grade_levels": rubric.grade_levels().len(),
        "criteria": rubric.criteria().len(),
        "indicators": rubric.indicators().len(),
        "students": rubric.students().len(),
        "teams": rubric.students().teams().len(),
    })
}

fn print_summary(rubric: &Rubric) {
    let evaluation = rubric.evaluation();
    println!("{} ({})", rubric.title(), evaluation.id());
    println!("  points:     {}", evaluation.points_total());
    println!("  levels:     {}", rubric.grade_levels().len());
    println!("  criteria:   {}", rubric.criteria().len());
    println!("  indicators: {}", rubric.indicators().len());
    println!(
        "  students:   {} ({} teams)",
        rubric.students().len(),
        rubric.students().teams().len()
    );
}
