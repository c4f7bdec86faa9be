//! `grille export` command - write the grade-upload sheet

use std::fs::File;
use std::io;

use crate::cli::{ExportArgs, OutputFormat};
use crate::commands::dispatch::CommandContext;
use grille_core::bail_usage;
use grille_core::error::{ConfigError, Result};
use grille_core::export::{upload_rows, write_upload};
use grille_core::gradesheet::{load_gradesheets, read_raw_sheets};

/// Execute the export command
pub fn execute(ctx: &CommandContext, args: &ExportArgs) -> Result<()> {
    let rubric = ctx.load_rubric(&args.config)?;
    let raws = read_raw_sheets(&args.sheets)?;
    let checked = load_gradesheets(&rubric, &raws, &ctx.settings.ingest_options())?;
    let rows = upload_rows(&rubric, &checked.value);

    let delimiter = match args.delimiter {
        Some(c) if c.is_ascii() => c as u8,
        Some(c) => bail_usage!(format!("delimiter `{}` is not a single-byte character", c)),
        None => ctx.settings.delimiter_byte(),
    };

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| ConfigError::io(path, e))?;
            write_upload(&rows, file, delimiter)?;
            if !ctx.cli.quiet {
                match ctx.format() {
                    OutputFormat::Json => println!(
                        "{}",
                        serde_json::to_string_pretty(&serde_json::json!({
                            "output": path.display().to_string(),
                            "rows": rows.len(),
                        }))?
                    ),
                    OutputFormat::Human => {
                        eprintln!("wrote {} rows to {}", rows.len(), path.display())
                    }
                }
            }
        }
        None => match ctx.format() {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
            OutputFormat::Human => write_upload(&rows, io::stdout().lock(), delimiter)?,
        },
    }

    if !ctx.cli.quiet {
        for warning in &checked.warnings {
            eprintln!("warning: {}", warning);
        }
    }

    Ok(())
}
