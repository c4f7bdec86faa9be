//! `grille show` command - display a completed rubric
//!
//! - `grille show <config>` - levels, criteria and indicators with points
//! - `grille show <config> --canonical` - canonical YAML with every inferred
//!   value written out

use crate::cli::{OutputFormat, ShowArgs};
use crate::commands::dispatch::CommandContext;
use grille_core::error::Result;
use grille_core::model::Rubric;

/// Execute the show command
pub fn execute(ctx: &CommandContext, args: &ShowArgs) -> Result<()> {
    let rubric = ctx.load_rubric(&args.config)?;

    if args.canonical {
        print!("{}", rubric.to_canonical_yaml()?);
        return Ok(());
    }

    match ctx.format() {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rubric)?),
        OutputFormat::Human => print_rubric(&rubric),
    }

    Ok(())
}

fn print_rubric(rubric: &Rubric) {
    let evaluation = rubric.evaluation();
    println!(
        "{} ({}) - {} points",
        rubric.title(),
        evaluation.id(),
        evaluation.points_total()
    );

    println!();
    println!("Grade levels:");
    for level in rubric.grade_levels() {
        println!(
            "  {:<16} {:>6}% - {}%",
            level.name(),
            level.min_percent(),
            level.max_percent()
        );
    }

    for criterion in rubric.criteria() {
        println!();
        println!(
            "[{}] {} - {} points",
            criterion.id(),
            criterion.name(),
            criterion.points_total()
        );
        for indicator in criterion.indicators() {
            println!(
                "  [{}] {} - {} points",
                indicator.id(),
                indicator.name(),
                indicator.points()
            );
            for (level, descriptor) in rubric.grade_levels().iter().zip(indicator.descriptors()) {
                let text = descriptor.as_deref().unwrap_or("-");
                println!("      {}: {}", level.name(), text);
            }
        }
    }
}
