//! Loading the cohort
//!
//! Students come either inline in the rubric or from a separate file: a
//! delimited text export with a header row, or a YAML/JSON list. Header names
//! and mapping keys go through the same key table as the rubric.

use std::path::Path;

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::lenient::rename::{canonical_key, rename};
use crate::lenient::{from_value, LenientStudent};
use crate::model::{Student, Students};

fn required(value: Option<String>, field: &str, path: &str) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::missing_field(field, path))
}

/// Trim and validate lenient rows; `path` locates the list in errors.
pub fn from_rows(rows: Vec<LenientStudent>, path: &str) -> Result<Students> {
    let mut students = Vec::with_capacity(rows.len());

    for (index, row) in rows.into_iter().enumerate() {
        let row_path = format!("{}[{}]", path, index);
        let is_team_reference = match &row.is_team_reference {
            Some(flag) => flag.resolve(&format!("{}.is_team_reference", row_path))?,
            None => false,
        };
        let team = row
            .team
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        students.push(Student::new(
            required(row.omnivox_code, "omnivox_code", &row_path)?,
            required(row.first_name, "first_name", &row_path)?,
            required(row.last_name, "last_name", &row_path)?,
            required(row.alias, "alias", &row_path)?,
            team,
            is_team_reference,
        ));
    }

    Students::new(students)
}

/// Load the cohort from a file, choosing the reader from its extension.
///
/// `.yaml`, `.yml` and `.json` hold a list of mappings; anything else is read
/// as delimited text split on `delimiter`.
pub fn load_students(path: &Path, delimiter: u8) -> Result<Students> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    let label = path.display().to_string();

    let rows = match extension.as_str() {
        "yaml" | "yml" | "json" => {
            let value: Value = serde_yaml::from_str(&text)?;
            from_value(rename(value)?, &label)?
        }
        _ => read_delimited(&text, delimiter, &label)?,
    };

    let students = from_rows(rows, &label)?;
    debug!(path = %label, students = students.len(), "students loaded");
    Ok(students)
}

/// Parse delimited text with a header row into lenient rows.
///
/// Blank cells count as missing and fully blank rows are skipped.
pub fn read_delimited(text: &str, delimiter: u8, label: &str) -> Result<Vec<LenientStudent>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()?
        .iter()
        .map(|header| {
            canonical_key(header)
                .map(str::to_string)
                .ok_or_else(|| ConfigError::unknown_key(header, format!("{} header", label)))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let mut mapping = Mapping::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            let value = if cell.is_empty() {
                Value::Null
            } else {
                Value::String(cell.to_string())
            };
            mapping.insert(Value::String(header.clone()), value);
        }
        // header row is line 1
        rows.push(from_value(
            Value::Mapping(mapping),
            &format!("{} line {}", label, index + 2),
        )?);
    }

    Ok(rows)
}
