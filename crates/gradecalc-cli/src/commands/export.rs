//! The `gradecalc export` and `gradecalc copy` commands.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;

use gradecalc_core::config::{load_config_from, GradecalcConfig};
use gradecalc_core::display::LiveDisplay;
use gradecalc_core::parser;
use gradecalc_core::traits::Calculator;
use gradecalc_report::{copy_result, export_report, ExportReport, ExportSink, FileSink, StdoutSink};

/// Stamp the current live summary of a calculator for export.
pub fn snapshot_export(calculator: &dyn Calculator, config: &GradecalcConfig) -> Result<ExportReport> {
    let snapshot = LiveDisplay::new(calculator).refresh();
    ExportReport::from_snapshot(&snapshot, &Local::now(), config)
}

pub async fn execute(
    sheet_path: PathBuf,
    output: Option<PathBuf>,
    to_stdout: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let file = parser::parse_sheet(&sheet_path)?;
    let report = snapshot_export(&file.sheet, &config)?;

    let sink: Box<dyn ExportSink> = if to_stdout {
        Box::new(StdoutSink)
    } else {
        Box::new(FileSink::new(output.unwrap_or(config.output_dir)))
    };

    let note = export_report(sink.as_ref(), &report).await;
    if !note.is_success() {
        anyhow::bail!("{note}");
    }
    eprintln!("{note}");
    Ok(())
}

pub async fn copy(sheet_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let file = parser::parse_sheet(&sheet_path)?;
    let report = snapshot_export(&file.sheet, &config)?;

    let note = copy_result(&StdoutSink, &report).await;
    if !note.is_success() {
        anyhow::bail!("{note}");
    }
    eprintln!("{note}");
    Ok(())
}
