//! Plain-text export artifact and clipboard summary.
//!
//! Both are built from what the live summary currently shows, not from a
//! fresh calculation, so an export always matches the screen.

use std::fmt::Write as _;

use anyhow::{anyhow, Result};
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use gradecalc_core::config::GradecalcConfig;
use gradecalc_core::display::DisplaySnapshot;
use gradecalc_core::model::Mode;

/// The fields of an exported result, already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReport {
    pub mode: Mode,
    pub value: String,
    pub grade: String,
    pub aux_label: String,
    pub aux: String,
    /// Calculation date as configured (e.g. `10/15/2026`).
    pub date: String,
    /// Calculation time as configured (e.g. `3:04:05 PM`).
    pub time: String,
    /// ISO date used in the file name.
    pub iso_date: String,
}

fn format_with<Tz>(at: &DateTime<Tz>, fmt: &str) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    write!(out, "{}", at.format(fmt)).map_err(|_| anyhow!("invalid date/time format: {fmt}"))?;
    Ok(out)
}

impl ExportReport {
    /// Stamp a snapshot with the given moment, formatted per `config`.
    pub fn from_snapshot<Tz>(
        snapshot: &DisplaySnapshot,
        at: &DateTime<Tz>,
        config: &GradecalcConfig,
    ) -> Result<Self>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Ok(Self {
            mode: snapshot.mode,
            value: snapshot.value_text.clone(),
            grade: snapshot.grade_text.clone(),
            aux_label: snapshot.aux_label.clone(),
            aux: snapshot.aux_text.clone(),
            date: format_with(at, &config.date_format)?,
            time: format_with(at, &config.time_format)?,
            iso_date: format_with(at, "%Y-%m-%d")?,
        })
    }

    /// The full text report.
    pub fn render(&self) -> String {
        let kind = self.mode.label();
        format!(
            "{kind} CALCULATOR REPORT\n\
             ============================\n\
             \n\
             {kind}: {}\n\
             Grade: {}\n\
             {}: {}\n\
             Calculation Date: {}\n\
             Calculation Time: {}\n\
             \n\
             Generated by {kind} Calculator",
            self.value, self.grade, self.aux_label, self.aux, self.date, self.time
        )
    }

    /// The short summary put on the clipboard.
    pub fn copy_summary(&self) -> String {
        let kind = self.mode.label();
        format!(
            "{kind} Calculator Result\n{kind}: {}\nGrade: {}\n{}: {}\nDate: {}",
            self.value, self.grade, self.aux_label, self.aux, self.date
        )
    }

    /// File name for the exported report, e.g. `GPA_Report_2026-10-15.txt`.
    pub fn file_name(&self) -> String {
        format!("{}_Report_{}.txt", self.mode.label(), self.iso_date)
    }
}
