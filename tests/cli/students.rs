use crate::cli::support::{grille, setup_lab, write_file};
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// students command tests
// ============================================================================

#[test]
fn test_students_list() {
    let dir = setup_lab();

    grille()
        .current_dir(dir.path())
        .args(["students", "rubric.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada Lovelace  team t1 (reference)"))
        .stdout(predicate::str::contains("Bob Babbage  team t1\n"))
        .stdout(predicate::str::contains("Cyd Hopper\n"));
}

#[test]
fn test_students_from_delimited_file() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir,
        "cohort.csv",
        "omnivox,first_name,last_name,alias\n11,Grace,Hopper,grace\n\n12,Alan,Turing,alan\n",
    );
    write_file(
        &dir,
        "rubric.yaml",
        r#"
evaluation:
  name: Quiz
  grade_levels: [{name: All, maximum: 100, minimum: 0}]
  criteria:
    - {name: C, indicators: [{name: I, points: 1, descriptors: [x]}]}
students: cohort.csv
"#,
    );

    let output = grille()
        .current_dir(dir.path())
        .args(["--format", "json", "students", "rubric.yaml"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json.as_array().map(Vec::len), Some(2));
    assert_eq!(json[1]["alias"], "alan");
    assert_eq!(json[1]["omnivox_code"], "12");
}

#[test]
fn test_students_missing_team_reference() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir,
        "rubric.yaml",
        r#"
evaluation:
  name: Quiz
  grade_levels: [{name: All, maximum: 100, minimum: 0}]
  criteria:
    - {name: C, indicators: [{name: I, points: 1, descriptors: [x]}]}
students:
  - {omnivox: 1, first_name: Ada, last_name: Lovelace, alias: ada, team: t1}
"#,
    );

    grille()
        .current_dir(dir.path())
        .args(["students", "rubric.yaml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("team `t1` has no reference student"));
}

#[test]
fn test_students_empty_cohort() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir,
        "rubric.yaml",
        r#"
evaluation:
  name: Quiz
  grade_levels: [{name: All, maximum: 100, minimum: 0}]
  criteria:
    - {name: C, indicators: [{name: I, points: 1, descriptors: [x]}]}
"#,
    );

    grille()
        .current_dir(dir.path())
        .args(["students", "rubric.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No students."));
}
