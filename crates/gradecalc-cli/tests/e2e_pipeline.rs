//! End-to-end pipeline tests: sheet file → calculator → live display → export.
//!
//! These run the same library calls the CLI makes, without spawning the binary.

use std::path::Path;

use chrono::{TimeZone, Utc};
use gradecalc_core::config::GradecalcConfig;
use gradecalc_core::display::LiveDisplay;
use gradecalc_core::parser::{parse_sheet, parse_sheet_str, validate_sheet};
use gradecalc_core::report::DetailedReport;
use gradecalc_core::sheet::{Edit, Sheet, SubjectField};
use gradecalc_core::{Calculator, Mode, SemesterMode};
use gradecalc_report::{copy_result, export_report, ExportReport, MemorySink};

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../sheets")
        .join(name)
}

fn stamp(sheet: &Sheet) -> ExportReport {
    let at = Utc.with_ymd_and_hms(2025, 3, 7, 14, 5, 9).unwrap();
    let snapshot = LiveDisplay::new(sheet).refresh();
    ExportReport::from_snapshot(&snapshot, &at, &GradecalcConfig::default()).unwrap()
}

#[test]
fn e2e_gpa_sheet_to_report() {
    let file = parse_sheet(&fixture("gpa-basic.toml")).unwrap();
    assert!(validate_sheet(&file).is_empty());

    let report = DetailedReport::calculate(&file.sheet).unwrap();
    assert_eq!(report.grade, "A-");
    assert_eq!(report.valid_count, 2);
    assert!((report.total_credits - 5.0).abs() < 1e-9);

    let live = LiveDisplay::new(&file.sheet).refresh();
    assert_eq!(live.value_text, format!("{:.2}", report.value));
}

#[test]
fn e2e_cgpa_sheet_ignores_subject_semester_credits() {
    let file = parse_sheet(&fixture("cgpa-mixed.toml")).unwrap();
    let result = file.sheet.calculate().unwrap();
    assert!((result.value - 62.5 / 18.0).abs() < 1e-9);
    assert!((result.total_credits - 18.0).abs() < 1e-9);
    assert_eq!(result.count_valid, 2);
}

#[tokio::test]
async fn e2e_export_bytes() {
    let file = parse_sheet(&fixture("gpa-basic.toml")).unwrap();
    let report = stamp(&file.sheet);
    let sink = MemorySink::new();

    let note = export_report(&sink, &report).await;
    assert!(note.is_success());
    assert_eq!(note.to_string(), "Report exported successfully!");

    let writes = sink.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].0, "GPA_Report_2025-03-07.txt");
    assert_eq!(
        writes[0].1,
        "GPA CALCULATOR REPORT\n\
         ============================\n\
         \n\
         GPA: 3.32\n\
         Grade: A-\n\
         Credits: 5\n\
         Calculation Date: 3/7/2025\n\
         Calculation Time: 2:05:09 PM\n\
         \n\
         Generated by GPA Calculator"
    );
}

#[tokio::test]
async fn e2e_copy_summary_for_cgpa() {
    let file = parse_sheet(&fixture("cgpa-mixed.toml")).unwrap();
    let report = stamp(&file.sheet);
    let sink = MemorySink::new();

    let note = copy_result(&sink, &report).await;
    assert_eq!(note.to_string(), "Result copied to clipboard!");
    assert_eq!(
        sink.writes()[0].1,
        "CGPA Calculator Result\nCGPA: 3.47\nGrade: A-\nSemesters: 2\nDate: 3/7/2025"
    );
}

#[tokio::test]
async fn e2e_export_does_not_touch_state() {
    let mut sheet = Sheet::empty(Mode::Gpa);
    sheet.apply(Edit::Generate { count: 1 }).unwrap();
    let before = sheet.clone();

    let sink = MemorySink::new();
    export_report(&sink, &stamp(&sheet)).await;
    copy_result(&sink, &stamp(&sheet)).await;

    assert_eq!(sheet, before);
    assert_eq!(sink.writes()[0].1.lines().nth(3), Some("GPA: 0.00"));
    assert_eq!(sink.writes()[0].1.lines().nth(4), Some("Grade: -"));
}

#[test]
fn e2e_edits_match_parsed_sheet() {
    let parsed = parse_sheet(&fixture("cgpa-mixed.toml")).unwrap();

    let mut built = Sheet::empty(Mode::Cgpa);
    let edits = vec![
        Edit::Generate { count: 2 },
        Edit::SemesterGpa {
            semester: 0,
            value: "3.5".into(),
        },
        Edit::SemesterCredits {
            semester: 0,
            value: "15".into(),
        },
        Edit::SetMode {
            semester: 1,
            mode: SemesterMode::Subjects,
        },
        Edit::GenerateSubjects {
            semester: 1,
            count: 2,
        },
    ];
    for edit in edits {
        built.apply(edit).unwrap();
    }
    for (row, marks, credits) in [(0, "85", "1"), (1, "70", "2")] {
        for (field, value) in [(SubjectField::Marks, marks), (SubjectField::Credits, credits)] {
            built
                .apply(Edit::Subject {
                    semester: Some(1),
                    row,
                    field,
                    value: value.into(),
                })
                .unwrap();
        }
    }

    assert_eq!(
        built.calculate().unwrap(),
        parsed.sheet.calculate().unwrap()
    );
    assert_eq!(
        LiveDisplay::new(&built).refresh(),
        LiveDisplay::new(&parsed.sheet).refresh()
    );
}

#[test]
fn e2e_invalid_rows_are_reported_and_skipped() {
    let file = parse_sheet(&fixture("gpa-invalid.toml")).unwrap();
    let warnings = validate_sheet(&file);
    assert_eq!(warnings.len(), 3);
    assert_eq!(warnings[0].location.as_deref(), Some("subject 1"));

    let result = file.sheet.calculate().unwrap();
    assert_eq!(result.count_valid, 1);
    assert!((result.value - 3.7).abs() < 1e-9);
}

#[test]
fn e2e_empty_sheet_reports_once() {
    let file = parse_sheet_str(
        "[sheet]\nmode = \"gpa\"\n\n[[subjects]]\nname = \"Blank\"\n",
        Path::new("blank.toml"),
    )
    .unwrap();

    let err = DetailedReport::calculate(&file.sheet).unwrap_err();
    assert!(err.is_empty_result());

    let warnings = validate_sheet(&file);
    let global: Vec<_> = warnings.iter().filter(|w| w.location.is_none()).collect();
    assert_eq!(global.len(), 1);
    assert_eq!(global[0].message, err.to_string());
}
