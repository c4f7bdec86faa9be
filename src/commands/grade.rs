//! `grille grade` command - ingest grade sheets and report per student

use crate::cli::{GradeArgs, OutputFormat};
use crate::commands::dispatch::CommandContext;
use grille_core::error::Result;
use grille_core::export::{feedback_report, FeedbackReport};
use grille_core::gradesheet::{load_gradesheets, read_raw_sheets};
use rust_decimal::Decimal;

/// Execute the grade command
pub fn execute(ctx: &CommandContext, args: &GradeArgs) -> Result<()> {
    let rubric = ctx.load_rubric(&args.config)?;
    let raws = read_raw_sheets(&args.sheets)?;

    let mut options = ctx.settings.ingest_options();
    options.allow_overshoot |= args.allow_overshoot;
    let checked = load_gradesheets(&rubric, &raws, &options)?;

    let reports: Vec<FeedbackReport> = checked
        .value
        .iter()
        .map(|sheet| feedback_report(&rubric, sheet, options.percentage_quantum))
        .collect();

    match ctx.format() {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "reports": reports,
                "warnings": checked.warnings,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            for report in &reports {
                print_report(report);
            }
            if !ctx.cli.quiet {
                for warning in &checked.warnings {
                    eprintln!("warning: {}", warning);
                }
            }
        }
    }

    Ok(())
}

fn percent(value: Option<Decimal>) -> String {
    value
        .map(|p| format!("{}%", (p * Decimal::ONE_HUNDRED).normalize()))
        .unwrap_or_else(|| "-".to_string())
}

fn grade(value: Option<Decimal>) -> String {
    value
        .map(|g| g.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn print_report(report: &FeedbackReport) {
    let student = report.student.as_deref().unwrap_or("(unknown student)");
    println!(
        "{} {}: {}/{} ({}) {}",
        report.omnivox_code,
        student,
        grade(report.grade),
        report.points,
        percent(report.percentage),
        report.level.as_deref().unwrap_or("-")
    );
    for criterion in &report.criteria {
        println!(
            "  [{}] {}: {}/{} ({}) {}",
            criterion.id,
            criterion.name,
            grade(criterion.grade),
            criterion.points,
            percent(criterion.percentage),
            criterion.level.as_deref().unwrap_or("-")
        );
        if let Some(comment) = &criterion.comment {
            println!("      # {}", comment);
        }
        for indicator in &criterion.indicators {
            println!(
                "    [{}] {}: {}/{} {}",
                indicator.id,
                indicator.name,
                grade(indicator.grade),
                indicator.points,
                indicator.descriptor.as_deref().unwrap_or("-")
            );
        }
    }
    if let Some(comment) = &report.comment {
        println!("  # {}", comment);
    }
}
