use crate::cli::support::{grille, setup_lab, write_file};
use predicates::prelude::*;

// ============================================================================
// grille.toml settings tests
// ============================================================================

#[test]
fn test_settings_default_format() {
    let dir = setup_lab();
    write_file(&dir, "grille.toml", "default_format = \"json\"\n");

    grille()
        .current_dir(dir.path())
        .args(["check", "rubric.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"ok\""));

    // --format wins over the setting
    grille()
        .current_dir(dir.path())
        .args(["--format", "human", "check", "rubric.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lab 1 (eval)"));
}

#[test]
fn test_settings_allow_overshoot() {
    let dir = setup_lab();
    write_file(&dir, "over.yaml", "- {OMNIVOX: 1, c1_i1_points: 6, c1_i2_points: 4}\n");
    write_file(&dir, "grille.toml", "allow_overshoot = true\n");

    grille()
        .current_dir(dir.path())
        .args(["grade", "rubric.yaml", "over.yaml"])
        .assert()
        .success();
}

#[test]
fn test_settings_explicit_path() {
    let dir = setup_lab();
    write_file(&dir, "other.toml", "students_delimiter = \"\\t\"\n");

    grille()
        .current_dir(dir.path())
        .args([
            "--settings",
            "other.toml",
            "export",
            "rubric.yaml",
            "sheets.yaml",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1\tLovelace\tAda\t8"));
}

#[test]
fn test_settings_unknown_key_fails() {
    let dir = setup_lab();
    write_file(&dir, "grille.toml", "colour = \"blue\"\n");

    grille()
        .current_dir(dir.path())
        .args(["check", "rubric.yaml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("colour"));
}
