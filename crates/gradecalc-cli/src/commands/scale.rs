//! The `gradecalc scale` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradecalc_core::scale::{FAILING_LETTER, GRADE_LETTER_TABLE, GRADE_POINT_TABLE};

pub fn execute() -> Result<()> {
    println!("{}", grade_point_table());
    println!("{}", letter_table());
    Ok(())
}

fn grade_point_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Marks", "Grade Point"]);

    let mut upper: Option<f64> = None;
    for &(min, point) in GRADE_POINT_TABLE {
        table.add_row(vec![
            Cell::new(band(min, upper, 0)),
            Cell::new(format!("{point:.1}")),
        ]);
        upper = Some(min);
    }
    if let Some(lowest) = upper {
        table.add_row(vec![
            Cell::new(format!("below {lowest:.0}")),
            Cell::new("0.0"),
        ]);
    }
    table
}

fn letter_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec!["GPA / CGPA", "Grade"]);

    let mut upper: Option<f64> = None;
    for &(min, letter) in GRADE_LETTER_TABLE {
        table.add_row(vec![Cell::new(band(min, upper, 1)), Cell::new(letter)]);
        upper = Some(min);
    }
    if let Some(lowest) = upper {
        table.add_row(vec![
            Cell::new(format!("below {lowest:.1}")),
            Cell::new(FAILING_LETTER),
        ]);
    }
    table
}

/// `min` up to (not including) `upper`, or open-ended for the top band.
fn band(min: f64, upper: Option<f64>, decimals: usize) -> String {
    match upper {
        Some(upper) => format!("{min:.decimals$} to <{upper:.decimals$}"),
        None => format!("{min:.decimals$} and above"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_labels() {
        assert_eq!(band(85.0, None, 0), "85 and above");
        assert_eq!(band(80.0, Some(85.0), 0), "80 to <85");
        assert_eq!(band(3.3, Some(3.7), 1), "3.3 to <3.7");
    }

    #[test]
    fn tables_list_every_band() {
        let points = grade_point_table().to_string();
        assert!(points.contains("85 and above"));
        assert!(points.contains("below 50"));

        let letters = letter_table().to_string();
        assert!(letters.contains("A-"));
        assert!(letters.contains("below 1.0"));
    }
}
