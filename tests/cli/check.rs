use crate::cli::support::{grille, setup_lab, write_file};
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// check command tests
// ============================================================================

#[test]
fn test_check_summary() {
    let dir = setup_lab();

    grille()
        .current_dir(dir.path())
        .args(["check", "rubric.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lab 1 (eval)"))
        .stdout(predicate::str::contains("indicators: 2"))
        .stdout(predicate::str::contains("3 (1 teams)"));
}

#[test]
fn test_check_quiet_prints_nothing() {
    let dir = setup_lab();

    grille()
        .current_dir(dir.path())
        .args(["--quiet", "check", "rubric.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_check_json() {
    let dir = setup_lab();

    let output = grille()
        .current_dir(dir.path())
        .args(["--format", "json", "check", "rubric.yaml"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["id"], "eval");
    assert_eq!(json["criteria"], 1);
    assert_eq!(json["students"], 3);
}

#[test]
fn test_check_duplicate_id_exit_code_3() {
    let dir = TempDir::new().unwrap();
    let rubric = r#"
evaluation:
  name: Exam
  grade_levels: [{name: All, maximum: 100, minimum: 0}]
  criteria:
    - {id: foo, name: First, indicators: [{name: I, points: 1, descriptors: [x]}]}
    - {id: foo, name: Second, indicators: [{name: J, points: 1, descriptors: [x]}]}
"#;
    write_file(&dir, "rubric.yaml", rubric);

    grille()
        .current_dir(dir.path())
        .args(["check", "rubric.yaml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("duplicate identifiers: foo"));
}

#[test]
fn test_check_error_json_envelope() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir,
        "rubric.yaml",
        r#"
evaluation:
  name: Exam
  points_total: 5
  grade_levels: [{name: All, maximum: 100, minimum: 0}]
  criteria:
    - name: C
      indicators:
        - {name: I, points: 4, descriptors: [x]}
        - {name: J, points: 3, descriptors: [x]}
"#,
    );

    grille()
        .current_dir(dir.path())
        .args(["--format", "json", "check", "rubric.yaml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"type\":\"points_overflow\""))
        .stderr(predicate::str::contains("\"code\":3"));
}

#[test]
fn test_check_unknown_key() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir,
        "rubric.yaml",
        "evaluation:\n  name: Exam\n  colour: blue\n",
    );

    grille()
        .current_dir(dir.path())
        .args(["check", "rubric.yaml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("colour"));
}
