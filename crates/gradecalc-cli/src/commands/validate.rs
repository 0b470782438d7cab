//! The `gradecalc validate` command.

use std::path::PathBuf;

use anyhow::Result;

use gradecalc_core::parser;

pub fn execute(sheet_path: PathBuf) -> Result<()> {
    let sheets = if sheet_path.is_dir() {
        parser::load_sheet_directory(&sheet_path)?
    } else {
        vec![parser::parse_sheet(&sheet_path)?]
    };

    let mut total_warnings = 0;

    for file in &sheets {
        let name = file
            .title
            .clone()
            .unwrap_or_else(|| file.source.display().to_string());
        println!("Sheet: {} ({})", name, file.mode().label());

        let warnings = parser::validate_sheet(file);
        for w in &warnings {
            let prefix = w
                .location
                .as_ref()
                .map(|loc| format!("  [{loc}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All sheets valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
