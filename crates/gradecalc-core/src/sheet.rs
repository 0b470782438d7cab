//! Sheet controllers: the row collections behind the GPA and CGPA forms.
//!
//! Rows are materialized when the user asks for N of them and are thrown
//! away wholesale on regenerate or reset; nothing is merged. A request for
//! an out-of-bounds count is rejected before any existing row is touched.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate_cgpa, aggregate_gpa, semester_totals, subject_totals};
use crate::error::CalcError;
use crate::model::{parse_field, AggregationResult, Mode, SemesterEntry, SemesterMode, SubjectRow};
use crate::traits::{Calculator, LiveReading};

/// Subjects allowed in a GPA sheet.
pub const SUBJECT_BOUNDS: RangeInclusive<usize> = 1..=20;
/// Semesters allowed in a CGPA sheet.
pub const SEMESTER_BOUNDS: RangeInclusive<usize> = 1..=10;
/// Subjects allowed inside one by-subjects semester.
pub const SEMESTER_SUBJECT_BOUNDS: RangeInclusive<usize> = 1..=15;

/// Parse a requested row count. Anything that is not a whole number is `None`.
pub fn parse_count(text: &str) -> Option<usize> {
    text.trim().parse().ok()
}

fn check_count(count: usize, bounds: &RangeInclusive<usize>, what: &str) -> Result<(), CalcError> {
    if bounds.contains(&count) {
        Ok(())
    } else {
        Err(CalcError::validation(format!(
            "Please enter a valid number of {what} ({}-{}).",
            bounds.start(),
            bounds.end()
        )))
    }
}

/// Which field of a subject row is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectField {
    Name,
    Marks,
    Credits,
}

fn set_subject_field(row: &mut SubjectRow, field: SubjectField, value: &str) {
    match field {
        SubjectField::Name => {
            let name = value.trim();
            row.name = (!name.is_empty()).then(|| name.to_string());
        }
        SubjectField::Marks => row.marks = parse_field(value),
        SubjectField::Credits => row.credits = parse_field(value),
    }
}

/// A single user action against a sheet. Indices are zero-based.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// Regenerate the top-level collection with `count` blank rows.
    Generate { count: usize },
    /// Regenerate the subject table of one semester.
    GenerateSubjects { semester: usize, count: usize },
    /// Toggle how a semester is entered.
    SetMode { semester: usize, mode: SemesterMode },
    /// Type into a subject field. `semester` is `None` on a GPA sheet.
    Subject {
        semester: Option<usize>,
        row: usize,
        field: SubjectField,
        value: String,
    },
    /// Type into a semester's direct GPA field.
    SemesterGpa { semester: usize, value: String },
    /// Type into a semester's direct credit-hours field.
    SemesterCredits { semester: usize, value: String },
    /// Discard every row.
    Reset,
}

// ---------------------------------------------------------------------------
// GPA sheet
// ---------------------------------------------------------------------------

/// Subject rows of the GPA page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GpaSheet {
    rows: Vec<SubjectRow>,
}

impl GpaSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sheet from already-populated rows, enforcing the count bounds.
    pub fn from_rows(rows: Vec<SubjectRow>) -> Result<Self, CalcError> {
        check_count(rows.len(), &SUBJECT_BOUNDS, "subjects")?;
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[SubjectRow] {
        &self.rows
    }

    /// Replace all rows with `count` blank ones.
    pub fn generate(&mut self, count: usize) -> Result<(), CalcError> {
        check_count(count, &SUBJECT_BOUNDS, "subjects")?;
        self.rows = vec![SubjectRow::default(); count];
        Ok(())
    }

    pub fn reset(&mut self) {
        self.rows.clear();
    }

    pub fn row_mut(&mut self, index: usize) -> Result<&mut SubjectRow, CalcError> {
        let len = self.rows.len();
        self.rows
            .get_mut(index)
            .ok_or_else(|| CalcError::validation(format!("No subject row {} (have {len}).", index + 1)))
    }

    pub fn set_field(
        &mut self,
        row: usize,
        field: SubjectField,
        value: &str,
    ) -> Result<(), CalcError> {
        set_subject_field(self.row_mut(row)?, field, value);
        Ok(())
    }

    pub fn apply(&mut self, edit: Edit) -> Result<(), CalcError> {
        match edit {
            Edit::Generate { count } => self.generate(count),
            Edit::Reset => {
                self.reset();
                Ok(())
            }
            Edit::Subject {
                semester: None,
                row,
                field,
                value,
            } => self.set_field(row, field, &value),
            other => Err(CalcError::validation(format!(
                "{} is not available on the GPA calculator.",
                edit_name(&other)
            ))),
        }
    }
}

impl Calculator for GpaSheet {
    fn mode(&self) -> Mode {
        Mode::Gpa
    }

    fn calculate(&self) -> Result<AggregationResult, CalcError> {
        aggregate_gpa(&self.rows)
    }

    fn live_reading(&self) -> LiveReading {
        let totals = subject_totals(&self.rows);
        LiveReading {
            value: totals.value(),
            auxiliary: totals.credits,
        }
    }
}

// ---------------------------------------------------------------------------
// CGPA sheet
// ---------------------------------------------------------------------------

/// One semester card of the CGPA page.
///
/// Both sides of the toggle keep their values; only the side selected by
/// `mode` is read by [`SemesterCard::entry`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemesterCard {
    pub mode: SemesterMode,
    pub gpa: Option<f64>,
    pub credits: Option<f64>,
    pub subjects: Vec<SubjectRow>,
}

impl SemesterCard {
    /// Project the active side of the card.
    pub fn entry(&self) -> SemesterEntry {
        match self.mode {
            SemesterMode::Direct => SemesterEntry::Direct {
                gpa: self.gpa,
                credits: self.credits,
            },
            SemesterMode::Subjects => SemesterEntry::BySubjects {
                rows: self.subjects.clone(),
            },
        }
    }

    /// Replace the subject table with `count` blank rows.
    pub fn generate_subjects(&mut self, count: usize) -> Result<(), CalcError> {
        check_count(count, &SEMESTER_SUBJECT_BOUNDS, "subjects")?;
        self.subjects = vec![SubjectRow::default(); count];
        Ok(())
    }
}

/// Semester cards of the CGPA page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CgpaSheet {
    semesters: Vec<SemesterCard>,
}

impl CgpaSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sheet from populated cards, enforcing every count bound.
    pub fn from_cards(semesters: Vec<SemesterCard>) -> Result<Self, CalcError> {
        check_count(semesters.len(), &SEMESTER_BOUNDS, "semesters")?;
        for card in &semesters {
            if card.mode == SemesterMode::Subjects || !card.subjects.is_empty() {
                check_count(card.subjects.len(), &SEMESTER_SUBJECT_BOUNDS, "subjects")?;
            }
        }
        Ok(Self { semesters })
    }

    pub fn semesters(&self) -> &[SemesterCard] {
        &self.semesters
    }

    /// The active entry of every card, in order.
    pub fn entries(&self) -> Vec<SemesterEntry> {
        self.semesters.iter().map(SemesterCard::entry).collect()
    }

    /// Replace all cards with `count` blank direct-mode cards.
    pub fn generate(&mut self, count: usize) -> Result<(), CalcError> {
        check_count(count, &SEMESTER_BOUNDS, "semesters")?;
        self.semesters = vec![SemesterCard::default(); count];
        Ok(())
    }

    pub fn reset(&mut self) {
        self.semesters.clear();
    }

    pub fn semester_mut(&mut self, index: usize) -> Result<&mut SemesterCard, CalcError> {
        let len = self.semesters.len();
        self.semesters
            .get_mut(index)
            .ok_or_else(|| CalcError::validation(format!("No semester {} (have {len}).", index + 1)))
    }

    pub fn generate_subjects(&mut self, semester: usize, count: usize) -> Result<(), CalcError> {
        self.semester_mut(semester)?.generate_subjects(count)
    }

    pub fn set_mode(&mut self, semester: usize, mode: SemesterMode) -> Result<(), CalcError> {
        self.semester_mut(semester)?.mode = mode;
        Ok(())
    }

    pub fn set_gpa(&mut self, semester: usize, value: &str) -> Result<(), CalcError> {
        self.semester_mut(semester)?.gpa = parse_field(value);
        Ok(())
    }

    pub fn set_credits(&mut self, semester: usize, value: &str) -> Result<(), CalcError> {
        self.semester_mut(semester)?.credits = parse_field(value);
        Ok(())
    }

    pub fn set_subject_field(
        &mut self,
        semester: usize,
        row: usize,
        field: SubjectField,
        value: &str,
    ) -> Result<(), CalcError> {
        let card = self.semester_mut(semester)?;
        let len = card.subjects.len();
        let subject = card.subjects.get_mut(row).ok_or_else(|| {
            CalcError::validation(format!(
                "No subject row {} in semester {} (have {len}).",
                row + 1,
                semester + 1
            ))
        })?;
        set_subject_field(subject, field, value);
        Ok(())
    }

    pub fn apply(&mut self, edit: Edit) -> Result<(), CalcError> {
        match edit {
            Edit::Generate { count } => self.generate(count),
            Edit::GenerateSubjects { semester, count } => self.generate_subjects(semester, count),
            Edit::SetMode { semester, mode } => self.set_mode(semester, mode),
            Edit::Subject {
                semester: Some(semester),
                row,
                field,
                value,
            } => self.set_subject_field(semester, row, field, &value),
            Edit::SemesterGpa { semester, value } => self.set_gpa(semester, &value),
            Edit::SemesterCredits { semester, value } => self.set_credits(semester, &value),
            Edit::Reset => {
                self.reset();
                Ok(())
            }
            Edit::Subject { semester: None, .. } => Err(CalcError::validation(
                "Subject edits on the CGPA calculator need a semester number.",
            )),
        }
    }
}

impl Calculator for CgpaSheet {
    fn mode(&self) -> Mode {
        Mode::Cgpa
    }

    fn calculate(&self) -> Result<AggregationResult, CalcError> {
        aggregate_cgpa(&self.entries())
    }

    fn live_reading(&self) -> LiveReading {
        let totals = semester_totals(&self.entries());
        LiveReading {
            value: totals.value(),
            auxiliary: self.semesters.len() as f64,
        }
    }
}

// ---------------------------------------------------------------------------
// Either sheet
// ---------------------------------------------------------------------------

/// The form state of whichever page is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Sheet {
    Gpa(GpaSheet),
    Cgpa(CgpaSheet),
}

impl Sheet {
    /// An empty sheet for the given page.
    pub fn empty(mode: Mode) -> Self {
        match mode {
            Mode::Gpa => Sheet::Gpa(GpaSheet::new()),
            Mode::Cgpa => Sheet::Cgpa(CgpaSheet::new()),
        }
    }

    pub fn apply(&mut self, edit: Edit) -> Result<(), CalcError> {
        match self {
            Sheet::Gpa(s) => s.apply(edit),
            Sheet::Cgpa(s) => s.apply(edit),
        }
    }

    pub fn as_calculator(&self) -> &dyn Calculator {
        match self {
            Sheet::Gpa(s) => s,
            Sheet::Cgpa(s) => s,
        }
    }
}

impl Calculator for Sheet {
    fn mode(&self) -> Mode {
        self.as_calculator().mode()
    }

    fn calculate(&self) -> Result<AggregationResult, CalcError> {
        self.as_calculator().calculate()
    }

    fn live_reading(&self) -> LiveReading {
        self.as_calculator().live_reading()
    }
}

fn edit_name(edit: &Edit) -> &'static str {
    match edit {
        Edit::Generate { .. } => "Generating rows",
        Edit::GenerateSubjects { .. } => "Generating semester subjects",
        Edit::SetMode { .. } => "Switching semester mode",
        Edit::Subject { .. } => "Editing a semester subject",
        Edit::SemesterGpa { .. } => "Setting a semester GPA",
        Edit::SemesterCredits { .. } => "Setting semester credits",
        Edit::Reset => "Reset",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marks(sheet: &mut GpaSheet, row: usize, m: &str, c: &str) {
        sheet.set_field(row, SubjectField::Marks, m).unwrap();
        sheet.set_field(row, SubjectField::Credits, c).unwrap();
    }

    #[test]
    fn generate_respects_bounds() {
        let mut sheet = GpaSheet::new();
        assert!(sheet.generate(0).unwrap_err().is_validation());
        assert!(sheet.generate(21).is_err());
        sheet.generate(20).unwrap();
        assert_eq!(sheet.rows().len(), 20);
    }

    #[test]
    fn rejected_generate_keeps_existing_rows() {
        let mut sheet = GpaSheet::new();
        sheet.generate(2).unwrap();
        marks(&mut sheet, 0, "90", "3");
        let err = sheet.generate(25).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please enter a valid number of subjects (1-20)."
        );
        assert_eq!(sheet.rows().len(), 2);
        assert_eq!(sheet.rows()[0].marks, Some(90.0));
    }

    #[test]
    fn regenerate_discards_old_rows() {
        let mut sheet = GpaSheet::new();
        sheet.generate(3).unwrap();
        marks(&mut sheet, 0, "90", "3");
        sheet.generate(3).unwrap();
        assert!(sheet.rows().iter().all(|r| r.marks.is_none()));
    }

    #[test]
    fn live_reading_tracks_edits() {
        let mut sheet = GpaSheet::new();
        sheet.generate(2).unwrap();
        assert_eq!(sheet.live_reading().value, 0.0);
        assert!(sheet.calculate().unwrap_err().is_empty_result());

        marks(&mut sheet, 0, "90", "3");
        assert_eq!(sheet.live_reading().value, 4.0);
        assert_eq!(sheet.live_reading().auxiliary, 3.0);

        marks(&mut sheet, 1, "61", "2");
        let live = sheet.live_reading();
        assert!((live.value - 3.32).abs() < 1e-9);
        assert_eq!(live.auxiliary, 5.0);

        sheet.reset();
        assert_eq!(sheet.live_reading().value, 0.0);
    }

    #[test]
    fn edit_out_of_range_row_is_validation() {
        let mut sheet = GpaSheet::new();
        sheet.generate(1).unwrap();
        let err = sheet
            .apply(Edit::Subject {
                semester: None,
                row: 4,
                field: SubjectField::Marks,
                value: "80".into(),
            })
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn gpa_sheet_rejects_semester_edits() {
        let mut sheet = GpaSheet::new();
        let err = sheet
            .apply(Edit::SemesterGpa {
                semester: 0,
                value: "3.0".into(),
            })
            .unwrap_err();
        assert!(err.to_string().contains("GPA calculator"));
    }

    #[test]
    fn cgpa_sheet_toggle_keeps_both_sides() {
        let mut sheet = CgpaSheet::new();
        sheet.generate(1).unwrap();
        sheet.set_gpa(0, "3.5").unwrap();
        sheet.set_credits(0, "15").unwrap();
        sheet.generate_subjects(0, 1).unwrap();
        sheet
            .set_subject_field(0, 0, SubjectField::Marks, "70")
            .unwrap();
        sheet
            .set_subject_field(0, 0, SubjectField::Credits, "3")
            .unwrap();

        assert!((sheet.calculate().unwrap().value - 3.5).abs() < 1e-9);
        sheet.set_mode(0, SemesterMode::Subjects).unwrap();
        assert!((sheet.calculate().unwrap().value - 3.0).abs() < 1e-9);
        sheet.set_mode(0, SemesterMode::Direct).unwrap();
        assert!((sheet.calculate().unwrap().value - 3.5).abs() < 1e-9);
    }

    #[test]
    fn by_subjects_semester_credit_field_is_ignored() {
        let mut sheet = CgpaSheet::new();
        sheet.generate(2).unwrap();
        sheet.set_gpa(0, "3.5").unwrap();
        sheet.set_credits(0, "15").unwrap();
        sheet.set_mode(1, SemesterMode::Subjects).unwrap();
        sheet.generate_subjects(1, 2).unwrap();
        for (row, (m, c)) in [("85", "1"), ("70", "2")].into_iter().enumerate() {
            sheet
                .set_subject_field(1, row, SubjectField::Marks, m)
                .unwrap();
            sheet
                .set_subject_field(1, row, SubjectField::Credits, c)
                .unwrap();
        }

        let before = sheet.calculate().unwrap();
        sheet.set_credits(1, "99").unwrap();
        let after = sheet.calculate().unwrap();
        assert_eq!(before, after);
        assert!((after.value - 62.5 / 18.0).abs() < 1e-9);
    }

    #[test]
    fn cgpa_live_aux_counts_cards() {
        let mut sheet = CgpaSheet::new();
        sheet.generate(4).unwrap();
        sheet.set_gpa(0, "3.0").unwrap();
        sheet.set_credits(0, "10").unwrap();
        let live = sheet.live_reading();
        assert_eq!(live.auxiliary, 4.0);
        assert_eq!(sheet.calculate().unwrap().count_valid, 1);
    }

    #[test]
    fn semester_subject_bounds() {
        let mut sheet = CgpaSheet::new();
        sheet.generate(1).unwrap();
        let err = sheet.generate_subjects(0, 16).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please enter a valid number of subjects (1-15)."
        );
        assert!(sheet.generate(11).is_err());
        assert!(sheet.generate_subjects(3, 2).is_err());
    }

    #[test]
    fn sheet_dispatches_by_mode() {
        let mut sheet = Sheet::empty(Mode::Cgpa);
        sheet.apply(Edit::Generate { count: 2 }).unwrap();
        sheet
            .apply(Edit::SemesterGpa {
                semester: 1,
                value: "2.0".into(),
            })
            .unwrap();
        sheet
            .apply(Edit::SemesterCredits {
                semester: 1,
                value: "12".into(),
            })
            .unwrap();
        assert_eq!(sheet.mode(), Mode::Cgpa);
        assert!((sheet.calculate().unwrap().value - 2.0).abs() < 1e-9);

        sheet.apply(Edit::Reset).unwrap();
        assert!(sheet.calculate().unwrap_err().is_empty_result());
    }

    #[test]
    fn parse_count_requires_whole_number() {
        assert_eq!(parse_count("5"), Some(5));
        assert_eq!(parse_count(" 12 "), Some(12));
        assert_eq!(parse_count("two"), None);
        assert_eq!(parse_count("-1"), None);
    }
}
