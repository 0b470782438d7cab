//! Core data model types for gradecalc.
//!
//! Form fields arrive as text. A field that does not parse as a finite
//! number is stored as `None` and simply makes its row invalid; nothing here
//! ever errors on bad input.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which calculator a sheet or display belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Gpa,
    Cgpa,
}

impl Mode {
    /// Upper-case type label used in reports ("GPA" / "CGPA").
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Gpa => "GPA",
            Mode::Cgpa => "CGPA",
        }
    }

    /// Title shown above the live summary.
    pub fn result_title(&self) -> &'static str {
        match self {
            Mode::Gpa => "Your GPA",
            Mode::Cgpa => "Your CGPA",
        }
    }

    /// Label of the auxiliary count in the live summary and exports.
    pub fn aux_label(&self) -> &'static str {
        match self {
            Mode::Gpa => "Credits",
            Mode::Cgpa => "Semesters",
        }
    }

    /// Label of the valid-unit count in the detailed report.
    pub fn valid_label(&self) -> &'static str {
        match self {
            Mode::Gpa => "Valid Subjects",
            Mode::Cgpa => "Valid Semesters",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Gpa => write!(f, "gpa"),
            Mode::Cgpa => write!(f, "cgpa"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gpa" => Ok(Mode::Gpa),
            "cgpa" => Ok(Mode::Cgpa),
            other => Err(format!("unknown calculator mode: {other}")),
        }
    }
}

/// Parse a form field the way a number input reports it.
///
/// Blank, non-numeric, NaN, and infinite text all yield `None`.
pub fn parse_field(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A single subject row of a GPA table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectRow {
    /// Optional display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Percentage mark, `None` when the field is blank or non-numeric.
    #[serde(default)]
    pub marks: Option<f64>,
    /// Credit hours, `None` when the field is blank or non-numeric.
    #[serde(default)]
    pub credits: Option<f64>,
}

impl SubjectRow {
    pub fn new(marks: f64, credits: f64) -> Self {
        Self {
            name: None,
            marks: Some(marks),
            credits: Some(credits),
        }
    }

    /// Build a row from raw field text.
    pub fn from_fields(name: &str, marks: &str, credits: &str) -> Self {
        let name = name.trim();
        Self {
            name: (!name.is_empty()).then(|| name.to_string()),
            marks: parse_field(marks),
            credits: parse_field(credits),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// `(marks, credits)` if the row is inside the declared domain.
    pub fn valid_pair(&self) -> Option<(f64, f64)> {
        match (self.marks, self.credits) {
            (Some(m), Some(c)) if (0.0..=100.0).contains(&m) && c > 0.0 => Some((m, c)),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid_pair().is_some()
    }
}

/// How a semester's contribution is entered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemesterMode {
    /// The semester GPA and credit hours are typed in directly.
    #[default]
    Direct,
    /// The semester is computed from its subject rows.
    Subjects,
}

impl fmt::Display for SemesterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemesterMode::Direct => write!(f, "direct"),
            SemesterMode::Subjects => write!(f, "subjects"),
        }
    }
}

impl FromStr for SemesterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "direct" => Ok(SemesterMode::Direct),
            "subjects" | "by-subjects" | "marks" => Ok(SemesterMode::Subjects),
            other => Err(format!("unknown semester mode: {other}")),
        }
    }
}

/// The active contribution of one semester to a CGPA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SemesterEntry {
    /// Weighted by the semester's own declared credit hours.
    Direct {
        gpa: Option<f64>,
        credits: Option<f64>,
    },
    /// Weighted by the sum of its subjects' credit hours.
    #[serde(rename = "subjects")]
    BySubjects { rows: Vec<SubjectRow> },
}

impl SemesterEntry {
    pub fn direct(gpa: f64, credits: f64) -> Self {
        SemesterEntry::Direct {
            gpa: Some(gpa),
            credits: Some(credits),
        }
    }

    pub fn by_subjects(rows: Vec<SubjectRow>) -> Self {
        SemesterEntry::BySubjects { rows }
    }

    pub fn mode(&self) -> SemesterMode {
        match self {
            SemesterEntry::Direct { .. } => SemesterMode::Direct,
            SemesterEntry::BySubjects { .. } => SemesterMode::Subjects,
        }
    }
}

/// Outcome of one aggregation pass. Recomputed on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    /// The GPA or CGPA.
    pub value: f64,
    /// Sum of credit hours that contributed.
    pub total_credits: f64,
    /// Number of rows or semesters that contributed.
    pub count_valid: usize,
}

impl AggregationResult {
    pub fn grade(&self) -> &'static str {
        crate::scale::grade_letter(self.value)
    }
}
