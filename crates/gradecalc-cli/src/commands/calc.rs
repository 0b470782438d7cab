//! The `gradecalc calc` command.

use std::path::PathBuf;

use anyhow::Result;

use gradecalc_core::config::load_config_from;
use gradecalc_core::parser;
use gradecalc_core::report::DetailedReport;
use gradecalc_report::html::write_html_report;

pub fn execute(
    sheet_path: PathBuf,
    format: String,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let file = parser::parse_sheet(&sheet_path)?;
    let report = DetailedReport::calculate(&file.sheet)?.with_title(file.title.clone());

    let stem = format!(
        "{}_Report_{}",
        report.mode.label(),
        report.created_at.format("%Y-%m-%d")
    );

    match format.as_str() {
        "json" => match output {
            Some(dir) => {
                let path = dir.join(format!("{stem}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            None => println!("{}", serde_json::to_string_pretty(&report)?),
        },
        "html" => {
            let dir = match output {
                Some(dir) => dir,
                None => load_config_from(config_path.as_deref())?.output_dir,
            };
            let path = dir.join(format!("{stem}.html"));
            write_html_report(&report, &path)?;
            eprintln!("HTML report: {}", path.display());
        }
        "text" => print!("{}", report.render_text()),
        other => anyhow::bail!("unknown format: {other} (expected text, json, or html)"),
    }

    Ok(())
}
