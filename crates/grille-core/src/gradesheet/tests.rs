use super::*;
use crate::config::load_config_str;
use crate::error::ErrorKind;
use crate::settings::Settings;
use rust_decimal_macros::dec;

const RUBRIC: &str = r#"
evaluation:
  name: Project
  points_total: 20
  grade_levels:
    - {name: Excellent, maximum: 100, minimum: 80}
    - {name: Pass, maximum: 79, minimum: 50}
    - {name: Fail, maximum: 49, minimum: 0}
  criteria:
    - name: Code
      points_total: 12
      indicators:
        - {name: Style, points: 6, descriptors: [clean, readable, null]}
        - {name: Logic, points: 6, descriptors: [sound, shaky, broken]}
    - name: Report
      indicators:
        - {name: Writing, descriptors: [clear, ok, poor]}
students:
  - {omnivox: 100, first_name: Ada, last_name: Lovelace, alias: ada}
"#;

fn rubric() -> Rubric {
    load_config_str(RUBRIC, Path::new("."), &Settings::default()).unwrap()
}

fn raw(entries: &[(&str, CellValue)]) -> RawSheet {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

fn num(value: Decimal) -> CellValue {
    CellValue::Number(value)
}

fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

#[test]
fn test_bottom_up_sheet() {
    let rubric = rubric();
    let checked = load_gradesheet(
        &rubric,
        &raw(&[
            ("OMNIVOX", num(dec!(100))),
            ("c1_i1_points", num(dec!(5))),
            ("c1_i2_points", text("4,5")),
            ("c2_points", num(dec!(6))),
            ("c2_commentaire", text("  Well argued ")),
            ("stray_cell", text("ignored")),
        ]),
        &IngestOptions::default(),
    )
    .unwrap();

    let sheet = checked.value;
    assert!(checked.warnings.is_empty());
    assert_eq!(sheet.omnivox_code(), "100");
    assert_eq!(sheet.grade("c1"), Some(dec!(9.5)));
    assert_eq!(sheet.grade("c2_i1"), Some(dec!(6)));
    assert_eq!(sheet.grade("eval"), Some(dec!(15.5)));
    assert_eq!(sheet.comment("c2"), Some("Well argued"));
    assert_eq!(rubric.percentage(&sheet, "eval"), Some(dec!(0.775)));
    assert_eq!(rubric.grade(&sheet, "c1", 0), Some(dec!(10)));
}

#[test]
fn test_not_available_is_absence() {
    let rubric = rubric();
    let checked = load_gradesheet(
        &rubric,
        &raw(&[
            ("OMNIVOX", text("100")),
            ("eval_points", num(dec!(10))),
            ("c1_points", text("#N/A")),
            ("c2_points", CellValue::Empty),
            ("c1_i1_commentaire", text("#N/A")),
        ]),
        &IngestOptions::default(),
    )
    .unwrap();

    let sheet = checked.value;
    assert_eq!(sheet.grade("c1"), Some(dec!(6)));
    assert_eq!(sheet.grade("c2"), Some(dec!(4)));
    assert_eq!(sheet.comment("c1_i1"), None);
}

#[test]
fn test_omnivox_required() {
    let err = load_gradesheet(
        &rubric(),
        &raw(&[("eval_points", num(dec!(10))), ("OMNIVOX", text("  "))]),
        &IngestOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OmnivoxMissing);
}

#[test]
fn test_unparseable_grade() {
    let err = load_gradesheet(
        &rubric(),
        &raw(&[("OMNIVOX", text("100")), ("eval_points", text("ten"))]),
        &IngestOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::BadType { ref path, .. } if path == "eval_points"));
}

#[test]
fn test_grade_above_points() {
    let sheet = raw(&[
        ("OMNIVOX", text("100")),
        ("c1_i1_points", num(dec!(7))),
        ("c1_i2_points", num(dec!(6))),
        ("c2_points", num(dec!(6))),
    ]);
    let err = load_gradesheet(&rubric(), &sheet, &IngestOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::GradeOutOfRange { ref entity, .. } if entity == "c1"
    ));

    let options = IngestOptions {
        allow_overshoot: true,
        ..IngestOptions::default()
    };
    let checked = load_gradesheet(&rubric(), &sheet, &options).unwrap();
    assert!(checked.warnings.iter().any(|w| matches!(
        w,
        GradeWarning::Overshoot { entity, .. } if entity == "c1"
    )));
}

#[test]
fn test_negative_grade_always_rejected() {
    let options = IngestOptions {
        allow_overshoot: true,
        ..IngestOptions::default()
    };
    let err = load_gradesheet(
        &rubric(),
        &raw(&[
            ("OMNIVOX", text("100")),
            ("c1_points", num(dec!(-1))),
            ("c2_points", num(dec!(4))),
        ]),
        &options,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::GradeOutOfRange);
}

#[test]
fn test_grade_at_null_descriptor() {
    let err = load_gradesheet(
        &rubric(),
        &raw(&[
            ("OMNIVOX", text("100")),
            ("c1_i1_points", num(dec!(1))),
            ("c1_i2_points", num(dec!(6))),
            ("c2_points", num(dec!(8))),
        ]),
        &IngestOptions::default(),
    )
    .unwrap_err();
    match err {
        ConfigError::GradeAtNullDescriptor { indicator, level } => {
            assert_eq!(indicator, "c1_i1");
            assert_eq!(level, "Fail");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_indicators_above_criterion_warns() {
    let checked = load_gradesheet(
        &rubric(),
        &raw(&[
            ("OMNIVOX", text("100")),
            ("c1_points", num(dec!(8))),
            ("c1_i1_points", num(dec!(5))),
            ("c1_i2_points", num(dec!(5))),
            ("c2_points", num(dec!(8))),
        ]),
        &IngestOptions::default(),
    )
    .unwrap();
    assert_eq!(checked.warnings.len(), 1);
    assert!(matches!(
        &checked.warnings[0],
        GradeWarning::IndicatorsAboveCriterion { criterion, .. } if criterion == "c1"
    ));
}

#[test]
fn test_unknown_student_warns() {
    let checked = load_gradesheets(
        &rubric(),
        &[raw(&[("OMNIVOX", text("999")), ("eval_points", num(dec!(20)))])],
        &IngestOptions::default(),
    )
    .unwrap();
    assert_eq!(checked.value.len(), 1);
    assert_eq!(
        checked.warnings,
        vec![GradeWarning::UnknownStudent {
            omnivox_code: "999".to_string()
        }]
    );
}

#[test]
fn test_cells_deserialize_from_yaml() {
    let sheets: Vec<RawSheet> =
        serde_yaml::from_str("- OMNIVOX: 100\n  eval_points: 12.5\n  c1_commentaire: Bien\n  c2_points: ~\n")
            .unwrap();
    assert_eq!(sheets[0]["OMNIVOX"], num(dec!(100)));
    assert_eq!(sheets[0]["eval_points"], num(dec!(12.5)));
    assert_eq!(sheets[0]["c1_commentaire"], text("Bien"));
    assert_eq!(sheets[0]["c2_points"], CellValue::Empty);
}

#[test]
fn test_quoted_cells_kept_verbatim() {
    let sheets: Vec<RawSheet> = serde_json::from_str(
        r##"[{"OMNIVOX": "0123456", "c1_i1_points": "5", "eval_commentaire": "1.50", "c2_points": "#N/A"}]"##,
    )
    .unwrap();
    assert_eq!(sheets[0]["OMNIVOX"], text("0123456"));
    assert_eq!(sheets[0]["c1_i1_points"], text("5"));
    assert_eq!(sheets[0]["eval_commentaire"], text("1.50"));
}

#[test]
fn test_quoted_omnivox_matches_cohort() {
    let rubric = load_config_str(
        &RUBRIC.replace("omnivox: 100", "omnivox: '0123456'"),
        Path::new("."),
        &Settings::default(),
    )
    .unwrap();
    let sheets: Vec<RawSheet> = serde_json::from_str(
        r#"[{"OMNIVOX": "0123456", "c1_i1_points": "5", "c1_i2_points": 4.5, "c2_points": 6, "eval_commentaire": "1.50"}]"#,
    )
    .unwrap();

    let checked = load_gradesheets(&rubric, &sheets, &IngestOptions::default()).unwrap();
    assert!(checked.warnings.is_empty());
    let sheet = &checked.value[0];
    assert_eq!(sheet.omnivox_code(), "0123456");
    assert_eq!(sheet.comment("eval"), Some("1.50"));
    assert_eq!(sheet.grade("c1"), Some(dec!(9.5)));
    assert!(rubric.student_by_omnivox(sheet.omnivox_code()).is_some());
}
