//! TOML sheet parser.
//!
//! Loads GPA and CGPA form states from TOML files and directories, and
//! reports the rows that will be left out of the calculation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::aggregate::subject_totals;
use crate::model::{parse_field, Mode, SemesterEntry, SemesterMode, SubjectRow};
use crate::sheet::{CgpaSheet, GpaSheet, SemesterCard, Sheet};
use crate::traits::Calculator;

/// Intermediate TOML structure for parsing sheet files.
#[derive(Debug, Deserialize)]
struct TomlSheetFile {
    sheet: TomlSheetHeader,
    #[serde(default)]
    subjects: Vec<TomlSubject>,
    #[serde(default)]
    semesters: Vec<TomlSemester>,
}

#[derive(Debug, Deserialize)]
struct TomlSheetHeader {
    mode: String,
    #[serde(default)]
    title: Option<String>,
}

/// A form field as written in TOML: a number, or raw text as typed.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TomlField {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl TomlField {
    fn value(&self) -> Option<f64> {
        match self {
            TomlField::Integer(i) => Some(*i as f64),
            TomlField::Float(f) => Some(*f).filter(|v| v.is_finite()),
            TomlField::Text(s) => parse_field(s),
        }
    }
}

fn field(f: &Option<TomlField>) -> Option<f64> {
    f.as_ref().and_then(TomlField::value)
}

#[derive(Debug, Deserialize)]
struct TomlSubject {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    marks: Option<TomlField>,
    #[serde(default)]
    credits: Option<TomlField>,
}

impl TomlSubject {
    fn into_row(self) -> SubjectRow {
        SubjectRow {
            marks: field(&self.marks),
            credits: field(&self.credits),
            name: self.name.filter(|n| !n.trim().is_empty()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TomlSemester {
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    gpa: Option<TomlField>,
    #[serde(default)]
    credits: Option<TomlField>,
    #[serde(default)]
    subjects: Vec<TomlSubject>,
}

/// A parsed sheet file.
#[derive(Debug, Clone)]
pub struct SheetFile {
    /// Optional title from the `[sheet]` header.
    pub title: Option<String>,
    /// Where it was loaded from.
    pub source: PathBuf,
    /// The populated form state.
    pub sheet: Sheet,
}

impl SheetFile {
    pub fn mode(&self) -> Mode {
        self.sheet.mode()
    }
}

/// Parse a single TOML file into a [`SheetFile`].
pub fn parse_sheet(path: &Path) -> Result<SheetFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read sheet file: {}", path.display()))?;

    parse_sheet_str(&content, path)
}

/// Parse a TOML string into a [`SheetFile`] (useful for testing).
pub fn parse_sheet_str(content: &str, source_path: &Path) -> Result<SheetFile> {
    let parsed: TomlSheetFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let mode: Mode = parsed
        .sheet
        .mode
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{}", e))?;

    let sheet = match mode {
        Mode::Gpa => {
            anyhow::ensure!(
                parsed.semesters.is_empty(),
                "a gpa sheet cannot contain [[semesters]]: {}",
                source_path.display()
            );
            let rows = parsed
                .subjects
                .into_iter()
                .map(TomlSubject::into_row)
                .collect();
            Sheet::Gpa(GpaSheet::from_rows(rows)?)
        }
        Mode::Cgpa => {
            anyhow::ensure!(
                parsed.subjects.is_empty(),
                "a cgpa sheet lists subjects under [[semesters.subjects]], not [[subjects]]: {}",
                source_path.display()
            );
            let cards = parsed
                .semesters
                .into_iter()
                .map(|s| {
                    let mode = s
                        .mode
                        .as_deref()
                        .map(|m| m.parse().map_err(|e: String| anyhow::anyhow!("{}", e)))
                        .transpose()?
                        .unwrap_or_default();
                    Ok(SemesterCard {
                        mode,
                        gpa: field(&s.gpa),
                        credits: field(&s.credits),
                        subjects: s.subjects.into_iter().map(TomlSubject::into_row).collect(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Sheet::Cgpa(CgpaSheet::from_cards(cards)?)
        }
    };

    Ok(SheetFile {
        title: parsed.sheet.title.filter(|t| !t.trim().is_empty()),
        source: source_path.to_path_buf(),
        sheet,
    })
}

/// Recursively load all `.toml` sheet files from a directory.
pub fn load_sheet_directory(dir: &Path) -> Result<Vec<SheetFile>> {
    let mut sheets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            sheets.extend(load_sheet_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_sheet(&path) {
                Ok(sheet) => sheets.push(sheet),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(sheets)
}

/// A row-level warning: something that will be left out of the calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    /// Where the problem is, e.g. "semester 2, subject 1".
    pub location: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn at(location: String, message: impl Into<String>) -> Self {
        Self {
            location: Some(location),
            message: message.into(),
        }
    }
}

fn check_subject(location: String, row: &SubjectRow, warnings: &mut Vec<ValidationWarning>) {
    match row.marks {
        None => warnings.push(ValidationWarning::at(
            location.clone(),
            "marks are blank or not a number",
        )),
        Some(m) if !(0.0..=100.0).contains(&m) => warnings.push(ValidationWarning::at(
            location.clone(),
            format!("marks {m} are outside 0-100"),
        )),
        Some(_) => {}
    }
    match row.credits {
        None => warnings.push(ValidationWarning::at(
            location,
            "credits are blank or not a number",
        )),
        Some(c) if c <= 0.0 => warnings.push(ValidationWarning::at(
            location,
            format!("credits {c} must be greater than 0"),
        )),
        Some(_) => {}
    }
}

/// Validate a sheet for rows that will be excluded from aggregation.
pub fn validate_sheet(file: &SheetFile) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    match &file.sheet {
        Sheet::Gpa(sheet) => {
            for (i, row) in sheet.rows().iter().enumerate() {
                check_subject(format!("subject {}", i + 1), row, &mut warnings);
            }
        }
        Sheet::Cgpa(sheet) => {
            for (i, card) in sheet.semesters().iter().enumerate() {
                let sem = i + 1;
                match card.entry() {
                    SemesterEntry::Direct { gpa, credits } => {
                        match gpa {
                            None => warnings.push(ValidationWarning::at(
                                format!("semester {sem}"),
                                "GPA is blank or not a number",
                            )),
                            Some(g) if !(0.0..=4.0).contains(&g) => {
                                warnings.push(ValidationWarning::at(
                                    format!("semester {sem}"),
                                    format!("GPA {g} is outside 0-4"),
                                ))
                            }
                            Some(_) => {}
                        }
                        match credits {
                            None => warnings.push(ValidationWarning::at(
                                format!("semester {sem}"),
                                "credits are blank or not a number",
                            )),
                            Some(c) if c <= 0.0 => warnings.push(ValidationWarning::at(
                                format!("semester {sem}"),
                                format!("credits {c} must be greater than 0"),
                            )),
                            Some(_) => {}
                        }
                    }
                    SemesterEntry::BySubjects { rows } => {
                        for (j, row) in rows.iter().enumerate() {
                            check_subject(
                                format!("semester {sem}, subject {}", j + 1),
                                row,
                                &mut warnings,
                            );
                        }
                        if subject_totals(&rows).count == 0 {
                            warnings.push(ValidationWarning::at(
                                format!("semester {sem}"),
                                "no valid subjects; this semester will not count",
                            ));
                        }
                    }
                }
                if card.mode == SemesterMode::Subjects && card.credits.is_some() {
                    warnings.push(ValidationWarning::at(
                        format!("semester {sem}"),
                        "credits are ignored when the semester is calculated from subjects",
                    ));
                }
            }
        }
    }

    if let Err(e) = file.sheet.calculate() {
        warnings.push(ValidationWarning {
            location: None,
            message: e.to_string(),
        });
    }

    warnings
}
