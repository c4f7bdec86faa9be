//! Loading a rubric
//!
//! Pipeline: YAML text, key renaming, lenient model, points inference,
//! validation, then the cohort. Each stage fails with a [`ConfigError`]
//! naming where the problem is.

use std::path::Path;
use std::time::Instant;

use serde_yaml::Value;
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::lenient::rename::rename;
use crate::lenient::{from_value, LenientEvaluation, LenientStudent};
use crate::model::{Rubric, Students};
use crate::settings::Settings;
use crate::students::{from_rows, load_students};
use crate::trace_time;

/// Load a rubric with default settings.
pub fn load_config(path: &Path) -> Result<Rubric> {
    load_config_with(path, &Settings::default())
}

/// Load a rubric; a students path is resolved against the rubric's folder.
pub fn load_config_with(path: &Path, settings: &Settings) -> Result<Rubric> {
    let start = Instant::now();
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let rubric = load_config_str(&text, base_dir, settings)?;
    trace_time!(start, "load_config", path = path.display().to_string());
    Ok(rubric)
}

/// Load a rubric from YAML text.
pub fn load_config_str(text: &str, base_dir: &Path, settings: &Settings) -> Result<Rubric> {
    let value: Value = serde_yaml::from_str(text)?;
    let Value::Mapping(mut root) = rename(value)? else {
        crate::bail_bad_type!("$", "a rubric must be a mapping");
    };

    let evaluation = root
        .remove("evaluation")
        .ok_or_else(|| ConfigError::missing_field("evaluation", "$"))?;
    let format = root.remove("format").filter(|f| !f.is_null());
    let students = root.remove("students");
    if let Some((key, _)) = root.into_iter().next() {
        return Err(ConfigError::unknown_key(key.as_str().unwrap_or_default(), "$"));
    }

    let evaluation = from_value::<LenientEvaluation>(evaluation, "$.evaluation")?.complete()?;
    let students = match students {
        None | Some(Value::Null) => Students::default(),
        Some(Value::String(path)) => {
            load_students(&base_dir.join(path), settings.delimiter_byte())?
        }
        Some(list @ Value::Sequence(_)) => {
            let rows: Vec<LenientStudent> = from_value(list, "$.students")?;
            from_rows(rows, "$.students")?
        }
        Some(_) => crate::bail_bad_type!(
            "$.students",
            "expected a file path or a list of students"
        ),
    };

    debug!(
        evaluation = evaluation.id(),
        criteria = evaluation.criteria().len(),
        students = students.len(),
        "rubric loaded"
    );
    Ok(Rubric::new(evaluation, format, students))
}
