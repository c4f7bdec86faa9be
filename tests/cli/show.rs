use crate::cli::support::{grille, run_and_get_stdout, setup_lab, write_file};
use predicates::prelude::*;

// ============================================================================
// show command tests
// ============================================================================

#[test]
fn test_show_tree() {
    let dir = setup_lab();

    grille()
        .current_dir(dir.path())
        .args(["show", "rubric.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Grade levels:"))
        .stdout(predicate::str::contains("[c1] Work"))
        .stdout(predicate::str::contains("[c1_i2] Speed"))
        .stdout(predicate::str::contains("Pass: solid"));
}

#[test]
fn test_show_canonical_reloads() {
    let dir = setup_lab();

    let canonical = run_and_get_stdout(&dir, &["show", "rubric.yaml", "--canonical"]);
    assert!(canonical.contains("points_inference_step"));
    assert!(canonical.contains("c1_i1"));

    // The canonical form is itself a valid rubric, and a fixed point
    write_file(&dir, "canonical.yaml", &canonical);
    let again = run_and_get_stdout(&dir, &["show", "canonical.yaml", "--canonical"]);
    assert_eq!(again, canonical);
}

#[test]
fn test_show_json() {
    let dir = setup_lab();

    let output = grille()
        .current_dir(dir.path())
        .args(["--format", "json", "show", "rubric.yaml"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let indicators = &json["evaluation"]["criteria"][0]["indicators"];
    assert_eq!(indicators.as_array().map(Vec::len), Some(2));
    assert_eq!(indicators[1]["id"], "c1_i2");
}
