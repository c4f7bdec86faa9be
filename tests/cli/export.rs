use crate::cli::support::{grille, run_and_get_stdout, setup_lab};
use predicates::prelude::*;
use std::fs;

// ============================================================================
// export command tests
// ============================================================================

#[test]
fn test_export_stdout() {
    let dir = setup_lab();

    let stdout = run_and_get_stdout(&dir, &["export", "rubric.yaml", "sheets.yaml"]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "omnivox_code,last_name,first_name,grade",
            "1,Lovelace,Ada,8",
            // team member graded through the reference's sheet
            "2,Babbage,Bob,8",
            "3,Hopper,Cyd,5",
        ]
    );
}

#[test]
fn test_export_delimiter() {
    let dir = setup_lab();

    grille()
        .current_dir(dir.path())
        .args(["export", "rubric.yaml", "sheets.yaml", "--delimiter", ";"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1;Lovelace;Ada;8"));
}

#[test]
fn test_export_to_file() {
    let dir = setup_lab();

    grille()
        .current_dir(dir.path())
        .args(["export", "rubric.yaml", "sheets.yaml", "-o", "upload.csv"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("wrote 3 rows"));

    let written = fs::read_to_string(dir.path().join("upload.csv")).unwrap();
    assert!(written.starts_with("omnivox_code,last_name,first_name,grade"));
    assert!(written.contains("3,Hopper,Cyd,5"));
}

#[test]
fn test_export_missing_sheet_leaves_grade_empty() {
    let dir = setup_lab();
    fs::write(dir.path().join("one.yaml"), "- {OMNIVOX: 3, eval_points: 7}\n").unwrap();

    let stdout = run_and_get_stdout(&dir, &["export", "rubric.yaml", "one.yaml"]);
    assert!(stdout.contains("1,Lovelace,Ada,\n"));
    assert!(stdout.contains("3,Hopper,Cyd,7"));
}

#[test]
fn test_export_json() {
    let dir = setup_lab();

    let output = grille()
        .current_dir(dir.path())
        .args(["--format", "json", "export", "rubric.yaml", "sheets.yaml"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[1]["omnivox_code"], "2");
    assert_eq!(json[1]["grade"], "8");
}
