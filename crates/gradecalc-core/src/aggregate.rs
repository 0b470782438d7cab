//! Credit-weighted GPA and CGPA aggregation.
//!
//! Both aggregators sum `grade point * credits` and `credits` over the
//! valid units and divide at the end. A by-subjects semester folds its raw
//! sums straight into the outer totals, so subject credits keep their exact
//! weight in the CGPA; a direct semester is weighted by its own declared
//! credit hours.

use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::model::{AggregationResult, Mode, SemesterEntry, SubjectRow};
use crate::scale::grade_point;

/// Running weighted sums over a set of units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of `grade point * credits`.
    pub points: f64,
    /// Sum of credits.
    pub credits: f64,
    /// Units that contributed.
    pub count: usize,
}

impl Totals {
    /// Weighted average, or 0.0 when nothing contributed.
    pub fn value(&self) -> f64 {
        if self.credits > 0.0 {
            self.points / self.credits
        } else {
            0.0
        }
    }

    fn add(&mut self, points: f64, credits: f64) {
        self.points += points;
        self.credits += credits;
        self.count += 1;
    }

    fn into_result(self, mode: Mode) -> Result<AggregationResult, CalcError> {
        if self.count == 0 {
            return Err(CalcError::EmptyResult { mode });
        }
        Ok(AggregationResult {
            value: self.value(),
            total_credits: self.credits,
            count_valid: self.count,
        })
    }
}

/// Accumulate the valid rows of a subject table. Never fails.
pub fn subject_totals(rows: &[SubjectRow]) -> Totals {
    let mut totals = Totals::default();
    for (marks, credits) in rows.iter().filter_map(SubjectRow::valid_pair) {
        totals.add(grade_point(marks) * credits, credits);
    }
    totals
}

/// Accumulate the valid semesters of a CGPA form. Never fails.
///
/// A by-subjects semester with no valid subjects contributes nothing and is
/// not counted.
pub fn semester_totals(entries: &[SemesterEntry]) -> Totals {
    let mut totals = Totals::default();
    for entry in entries {
        match entry {
            SemesterEntry::Direct {
                gpa: Some(gpa),
                credits: Some(credits),
            } if (0.0..=4.0).contains(gpa) && *credits > 0.0 => {
                totals.add(gpa * credits, *credits);
            }
            SemesterEntry::Direct { .. } => {}
            SemesterEntry::BySubjects { rows } => {
                let sub = subject_totals(rows);
                if sub.credits > 0.0 {
                    totals.add(sub.points, sub.credits);
                }
            }
        }
    }
    totals
}

/// Compute a GPA from subject rows.
///
/// Fails with [`CalcError::EmptyResult`] when no row is valid, so that "no
/// data" never shows up as a computed 0.00.
pub fn aggregate_gpa(rows: &[SubjectRow]) -> Result<AggregationResult, CalcError> {
    let result = subject_totals(rows).into_result(Mode::Gpa);
    if let Ok(r) = &result {
        tracing::debug!(
            value = r.value,
            credits = r.total_credits,
            valid = r.count_valid,
            "aggregated GPA"
        );
    }
    result
}

/// Compute a CGPA from semester entries.
pub fn aggregate_cgpa(entries: &[SemesterEntry]) -> Result<AggregationResult, CalcError> {
    let result = semester_totals(entries).into_result(Mode::Cgpa);
    if let Ok(r) = &result {
        tracing::debug!(
            value = r.value,
            credits = r.total_credits,
            valid = r.count_valid,
            "aggregated CGPA"
        );
    }
    result
}
