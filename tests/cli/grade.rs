use crate::cli::support::{grille, setup_lab, write_file};
use predicates::prelude::*;

// ============================================================================
// grade command tests
// ============================================================================

#[test]
fn test_grade_reports() {
    let dir = setup_lab();

    grille()
        .current_dir(dir.path())
        .args(["grade", "rubric.yaml", "sheets.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada Lovelace"))
        .stdout(predicate::str::contains("Pass"))
        .stdout(predicate::str::contains("# Good pace"))
        .stdout(predicate::str::contains("Cyd Hopper"))
        .stdout(predicate::str::contains("Fail"));
}

#[test]
fn test_grade_json() {
    let dir = setup_lab();

    let output = grille()
        .current_dir(dir.path())
        .args(["--format", "json", "grade", "rubric.yaml", "sheets.yaml"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let reports = json["reports"].as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["omnivox_code"], "1");
    assert_eq!(reports[0]["level"], "Pass");
    assert_eq!(reports[0]["criteria"][0]["comment"], "Good pace");
    assert_eq!(reports[1]["level"], "Fail");
    assert_eq!(json["warnings"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_grade_json_sheets() {
    let dir = setup_lab();
    write_file(
        &dir,
        "sheets.json",
        r##"[{"OMNIVOX": "3", "c1_points": 6, "c1_i1_points": "#N/A", "c1_i2_points": ""}]"##,
    );

    let output = grille()
        .current_dir(dir.path())
        .args(["--format", "json", "grade", "rubric.yaml", "sheets.json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let indicators = &json["reports"][0]["criteria"][0]["indicators"];
    // the criterion grade is spread over its indicators
    assert_eq!(indicators[0]["grade"], "3");
    assert_eq!(indicators[0]["descriptor"], "solid");
    assert_eq!(indicators[1]["grade"], "3");
}

#[test]
fn test_grade_mixed_indicators_underspecified() {
    let dir = setup_lab();
    write_file(&dir, "mixed.yaml", "- {OMNIVOX: 1, c1_i1_points: 4, c1_i2_points: '#N/A'}\n");

    grille()
        .current_dir(dir.path())
        .args(["grade", "rubric.yaml", "mixed.yaml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("indicator `c1_i2` is not graded"));
}

#[test]
fn test_grade_out_of_range_exit_code_3() {
    let dir = setup_lab();
    write_file(&dir, "over.yaml", "- {OMNIVOX: 1, c1_i1_points: 6, c1_i2_points: 4}\n");

    grille()
        .current_dir(dir.path())
        .args(["grade", "rubric.yaml", "over.yaml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("is outside [0,"));
}

#[test]
fn test_grade_allow_overshoot_warns() {
    let dir = setup_lab();
    write_file(&dir, "over.yaml", "- {OMNIVOX: 1, c1_i1_points: 6, c1_i2_points: 4}\n");

    grille()
        .current_dir(dir.path())
        .args(["grade", "rubric.yaml", "over.yaml", "--allow-overshoot"])
        .assert()
        .success()
        .stderr(predicate::str::contains("warning:"));
}

#[test]
fn test_grade_missing_omnivox() {
    let dir = setup_lab();
    write_file(&dir, "anon.yaml", "- {c1_i1_points: 3}\n");

    grille()
        .current_dir(dir.path())
        .args(["--format", "json", "grade", "rubric.yaml", "anon.yaml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"type\":\"omnivox_missing\""));
}
