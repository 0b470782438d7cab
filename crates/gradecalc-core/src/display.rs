//! Live summary rendering.
//!
//! [`LiveDisplay`] holds a reference to the active calculator and re-reads
//! its full state on every refresh, so rows that were added, removed, or
//! toggled since the last edit are always reflected.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Mode;
use crate::scale::{grade_letter, MAX_GRADE_POINT};
use crate::traits::{Calculator, LiveReading};

/// Radius of the progress ring, in SVG user units.
pub const RING_RADIUS: f64 = 90.0;

/// Shown in place of a letter grade while nothing is valid.
pub const NO_GRADE: &str = "-";

/// Everything the compact summary shows after one refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    pub mode: Mode,
    pub title: String,
    pub progress_label: String,
    pub value: f64,
    /// Value with two decimals.
    pub value_text: String,
    pub grade_text: String,
    pub aux_label: String,
    pub aux_text: String,
    /// `value / 4.0` clamped to `[0, 1]`.
    pub ring_fraction: f64,
    /// Stroke dash offset of the ring fill.
    pub ring_offset: f64,
}

impl DisplaySnapshot {
    pub fn from_reading(mode: Mode, reading: LiveReading) -> Self {
        let fraction = ring_fraction(reading.value);
        let circumference = ring_circumference();
        let aux_text = match mode {
            Mode::Gpa => format!("{}", reading.auxiliary),
            Mode::Cgpa => format!("{}", reading.auxiliary.round() as i64),
        };
        let grade_text = if reading.value > 0.0 {
            grade_letter(reading.value).to_string()
        } else {
            NO_GRADE.to_string()
        };

        Self {
            mode,
            title: mode.result_title().to_string(),
            progress_label: mode.label().to_string(),
            value: reading.value,
            value_text: format!("{:.2}", reading.value),
            grade_text,
            aux_label: mode.aux_label().to_string(),
            aux_text,
            ring_fraction: fraction,
            ring_offset: circumference - fraction * circumference,
        }
    }

    /// A fixed-width text rendering of the ring, e.g. `[######--------]`.
    pub fn ring_bar(&self, width: usize) -> String {
        let filled = (self.ring_fraction * width as f64).round() as usize;
        format!(
            "[{}{}]",
            "#".repeat(filled),
            "-".repeat(width.saturating_sub(filled))
        )
    }
}

impl fmt::Display for DisplaySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} | Grade: {} | {}: {}",
            self.ring_bar(20),
            self.progress_label,
            self.value_text,
            self.grade_text,
            self.aux_label,
            self.aux_text
        )
    }
}

/// Fraction of the ring to fill for a score.
pub fn ring_fraction(value: f64) -> f64 {
    (value / MAX_GRADE_POINT).clamp(0.0, 1.0)
}

pub fn ring_circumference() -> f64 {
    2.0 * PI * RING_RADIUS
}

/// Recompute-and-render adapter bound to one calculator.
pub struct LiveDisplay<'a> {
    calculator: &'a dyn Calculator,
}

impl<'a> LiveDisplay<'a> {
    pub fn new(calculator: &'a dyn Calculator) -> Self {
        Self { calculator }
    }

    /// Re-read the calculator and build a fresh snapshot. Never fails.
    pub fn refresh(&self) -> DisplaySnapshot {
        let reading = self.calculator.live_reading();
        let snapshot = DisplaySnapshot::from_reading(self.calculator.mode(), reading);
        tracing::debug!(
            mode = %snapshot.mode,
            value = %snapshot.value_text,
            grade = %snapshot.grade_text,
            "live display refreshed"
        );
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{CgpaSheet, GpaSheet, SubjectField};

    #[test]
    fn empty_sheet_renders_placeholder() {
        let sheet = GpaSheet::new();
        let snap = LiveDisplay::new(&sheet).refresh();
        assert_eq!(snap.value_text, "0.00");
        assert_eq!(snap.grade_text, NO_GRADE);
        assert_eq!(snap.aux_text, "0");
        assert_eq!(snap.title, "Your GPA");
        assert_eq!(snap.ring_fraction, 0.0);
        assert!((snap.ring_offset - ring_circumference()).abs() < 1e-9);
    }

    #[test]
    fn gpa_snapshot_values() {
        let mut sheet = GpaSheet::new();
        sheet.generate(2).unwrap();
        sheet.set_field(0, SubjectField::Marks, "90").unwrap();
        sheet.set_field(0, SubjectField::Credits, "3").unwrap();
        sheet.set_field(1, SubjectField::Marks, "61").unwrap();
        sheet.set_field(1, SubjectField::Credits, "1.5").unwrap();

        let snap = LiveDisplay::new(&sheet).refresh();
        assert_eq!(snap.value_text, "3.43");
        assert_eq!(snap.grade_text, "A-");
        assert_eq!(snap.aux_label, "Credits");
        assert_eq!(snap.aux_text, "4.5");
    }

    #[test]
    fn display_rereads_after_regeneration() {
        let mut sheet = GpaSheet::new();
        sheet.generate(1).unwrap();
        sheet.set_field(0, SubjectField::Marks, "90").unwrap();
        sheet.set_field(0, SubjectField::Credits, "3").unwrap();
        assert_eq!(LiveDisplay::new(&sheet).refresh().value_text, "4.00");

        sheet.generate(1).unwrap();
        assert_eq!(LiveDisplay::new(&sheet).refresh().value_text, "0.00");
    }

    #[test]
    fn cgpa_snapshot_counts_semesters() {
        let mut sheet = CgpaSheet::new();
        sheet.generate(3).unwrap();
        sheet.set_gpa(0, "3.9").unwrap();
        sheet.set_credits(0, "18").unwrap();
        let snap = LiveDisplay::new(&sheet).refresh();
        assert_eq!(snap.aux_label, "Semesters");
        assert_eq!(snap.aux_text, "3");
        assert_eq!(snap.grade_text, "A");
        assert_eq!(snap.progress_label, "CGPA");
    }

    #[test]
    fn ring_fraction_is_clamped() {
        assert_eq!(ring_fraction(-1.0), 0.0);
        assert_eq!(ring_fraction(2.0), 0.5);
        assert_eq!(ring_fraction(4.0), 1.0);
        assert_eq!(ring_fraction(5.0), 1.0);
    }

    #[test]
    fn display_line_is_compact() {
        let snap = DisplaySnapshot::from_reading(
            Mode::Gpa,
            LiveReading {
                value: 2.0,
                auxiliary: 6.0,
            },
        );
        assert_eq!(snap.ring_bar(10), "[#####-----]");
        assert_eq!(
            snap.to_string(),
            "[##########----------] GPA: 2.00 | Grade: C+ | Credits: 6"
        );
    }
}
