//! The `gradecalc init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("gradecalc.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("sheets").context("failed to create sheets/")?;
    write_if_missing(Path::new("sheets/example-gpa.toml"), EXAMPLE_GPA_SHEET)?;
    write_if_missing(Path::new("sheets/example-cgpa.toml"), EXAMPLE_CGPA_SHEET)?;

    println!("\nNext steps:");
    println!("  1. Edit the example sheets with your own marks");
    println!("  2. Run: gradecalc validate --sheet sheets");
    println!("  3. Run: gradecalc calc --sheet sheets/example-gpa.toml");

    Ok(())
}

fn write_if_missing(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradecalc configuration

# Calculator opened by `gradecalc live` without --mode: "gpa" or "cgpa"
default_mode = "gpa"

# Where `gradecalc export` writes reports (GRADECALC_OUTPUT_DIR overrides this)
output_dir = "./gradecalc-reports"

# chrono formats stamped on exported reports
date_format = "%-m/%-d/%Y"
time_format = "%-I:%M:%S %p"
"#;

const EXAMPLE_GPA_SHEET: &str = r#"[sheet]
mode = "gpa"
title = "Fall term"

[[subjects]]
name = "Calculus"
marks = 90
credits = 3

[[subjects]]
name = "Physics"
marks = 61
credits = 2

# Left blank: ignored until both marks and credits are filled in
[[subjects]]
name = "Elective"
"#;

const EXAMPLE_CGPA_SHEET: &str = r#"[sheet]
mode = "cgpa"
title = "Degree so far"

[[semesters]]
mode = "direct"
gpa = 3.5
credits = 15

[[semesters]]
mode = "subjects"

[[semesters.subjects]]
name = "Algorithms"
marks = 85
credits = 1

[[semesters.subjects]]
name = "Databases"
marks = 70
credits = 2
"#;
