use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get a Command for grille
pub fn grille() -> Command {
    cargo_bin_cmd!("grille")
}

/// Ten-point lab with one criterion, two indicators and a three-student
/// cohort where `ada` is the reference of team `t1`
pub const RUBRIC: &str = r#"
evaluation:
  name: Lab 1
  points_total: 10
  grade_levels:
    - {name: Pass, maximum: 100, minimum: 60}
    - {name: Fail, maximum: 59, minimum: 0}
  criteria:
    - name: Work
      indicators:
        - {name: Quality, descriptors: [solid, weak]}
        - {name: Speed, descriptors: [fast, slow]}
students:
  - {omnivox: 1, first_name: Ada, last_name: Lovelace, alias: ada, team: t1, is_team_reference: true}
  - {omnivox: 2, first_name: Bob, last_name: Babbage, alias: bob, team: t1}
  - {omnivox: 3, first_name: Cyd, last_name: Hopper, alias: cyd}
"#;

/// Sheets for `ada` (bottom-up) and `cyd` (evaluation grade only)
pub const SHEETS: &str = r#"
- OMNIVOX: 1
  c1_i1_points: 4
  c1_i2_points: 4
  c1_commentaire: Good pace
- OMNIVOX: 3
  eval_points: 5
"#;

/// Write `content` to `name` inside `dir` and return the path
pub fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Temp dir holding `rubric.yaml` and `sheets.yaml`
#[allow(dead_code)]
pub fn setup_lab() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "rubric.yaml", RUBRIC);
    write_file(&dir, "sheets.yaml", SHEETS);
    dir
}

/// Run grille in `dir` and return stdout as String
#[allow(dead_code)]
pub fn run_and_get_stdout(dir: &TempDir, args: &[&str]) -> String {
    let output = grille().current_dir(dir.path()).args(args).output().unwrap();
    String::from_utf8_lossy(&output.stdout).to_string()
}
