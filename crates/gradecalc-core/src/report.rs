//! The detailed result panel shown after an explicit "Calculate".

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CalcError;
use crate::model::{AggregationResult, Mode};
use crate::scale::{grade_letter, motivational_message};
use crate::traits::Calculator;

/// A complete calculation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the calculation was made.
    pub created_at: DateTime<Utc>,
    /// Optional sheet title (e.g. "Fall 2025").
    #[serde(default)]
    pub title: Option<String>,
    pub mode: Mode,
    /// The GPA or CGPA.
    pub value: f64,
    pub grade: String,
    pub total_credits: f64,
    /// Valid subjects (GPA) or valid semesters (CGPA).
    pub valid_count: usize,
    pub message: String,
}

impl DetailedReport {
    pub fn from_result(mode: Mode, result: &AggregationResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            title: None,
            mode,
            value: result.value,
            grade: grade_letter(result.value).to_string(),
            total_credits: result.total_credits,
            valid_count: result.count_valid,
            message: motivational_message(result.value).to_string(),
        }
    }

    /// Run the calculator and build a report, or return why it could not.
    pub fn calculate(calculator: &dyn Calculator) -> Result<Self, CalcError> {
        let result = calculator.calculate()?;
        Ok(Self::from_result(calculator.mode(), &result))
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Render the result panel as plain text.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        if let Some(title) = &self.title {
            out.push_str(&format!("{title}\n\n"));
        }
        out.push_str(&format!(
            "{}: {:.2}\n",
            self.mode.result_title(),
            self.value
        ));
        out.push_str(&format!("Grade: {}\n", self.grade));
        out.push_str(&format!("Total Credits: {:.1}\n", self.total_credits));
        out.push_str(&format!(
            "{}: {}\n",
            self.mode.valid_label(),
            self.valid_count
        ));
        out.push_str("----------------------------\n");
        out.push_str(&self.message);
        out.push('\n');
        out
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: DetailedReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
