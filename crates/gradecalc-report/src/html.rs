//! HTML result panel.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use gradecalc_core::display::{ring_circumference, ring_fraction, RING_RADIUS};
use gradecalc_core::report::DetailedReport;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML page from a detailed report.
pub fn generate_html(report: &DetailedReport) -> String {
    let kind = report.mode.label();
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    match &report.title {
        Some(title) => html.push_str(&format!(
            "<title>{kind} Calculator - {}</title>\n",
            html_escape(title)
        )),
        None => html.push_str(&format!("<title>{kind} Calculator</title>\n")),
    }
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{kind} Calculator</h1>\n"));
    if let Some(title) = &report.title {
        html.push_str(&format!("<p class=\"meta\">{}</p>\n", html_escape(title)));
    }
    html.push_str(&format!(
        "<p class=\"meta\">Calculated {}</p>\n",
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Ring and summary
    html.push_str("<section class=\"result\">\n");
    html.push_str(&generate_ring(report.value, kind));
    html.push_str("<table class=\"summary\">\n<tbody>\n");
    let rows = [
        (report.mode.result_title().to_string(), format!("{:.2}", report.value)),
        ("Grade".to_string(), report.grade.clone()),
        ("Total Credits".to_string(), format!("{:.1}", report.total_credits)),
        (
            report.mode.valid_label().to_string(),
            report.valid_count.to_string(),
        ),
    ];
    for (label, value) in &rows {
        html.push_str(&format!(
            "<tr><th>{}</th><td>{}</td></tr>\n",
            html_escape(label),
            html_escape(value)
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str(&format!(
        "<p class=\"message\">{}</p>\n",
        html_escape(&report.message)
    ));
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str(&format!(
        "<footer>Generated by {kind} Calculator</footer>\n"
    ));
    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML page to a file.
pub fn write_html_report(report: &DetailedReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn generate_ring(value: f64, label: &str) -> String {
    let size = (RING_RADIUS * 2.0 + 20.0) as usize;
    let center = size / 2;
    let circumference = ring_circumference();
    let offset = circumference - ring_fraction(value) * circumference;

    let color = if value >= 3.0 {
        "#22c55e"
    } else if value >= 2.0 {
        "#eab308"
    } else {
        "#ef4444"
    };

    let mut svg = format!(
        "<svg width=\"{size}\" height=\"{size}\" xmlns=\"http://www.w3.org/2000/svg\">\n"
    );
    svg.push_str(&format!(
        "  <circle cx=\"{center}\" cy=\"{center}\" r=\"{RING_RADIUS}\" fill=\"none\" stroke=\"var(--border)\" stroke-width=\"12\"/>\n"
    ));
    svg.push_str(&format!(
        "  <circle class=\"ring-fill\" cx=\"{center}\" cy=\"{center}\" r=\"{RING_RADIUS}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"12\" stroke-linecap=\"round\" stroke-dasharray=\"{circumference:.2}\" stroke-dashoffset=\"{offset:.2}\" transform=\"rotate(-90 {center} {center})\"/>\n"
    ));
    svg.push_str(&format!(
        "  <text x=\"{center}\" y=\"{center}\" font-size=\"32\" fill=\"currentColor\" text-anchor=\"middle\" dominant-baseline=\"middle\">{value:.2}</text>\n"
    ));
    svg.push_str(&format!(
        "  <text x=\"{center}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"middle\">{label}</text>\n",
        center + 30
    ));
    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --muted: #6b7280; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --muted: #9ca3af; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1 { margin-top: 1rem; }
.meta { color: var(--muted); }
.result { text-align: center; }
table { border-collapse: collapse; margin: 1rem auto; min-width: 20rem; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.message { font-size: 1.2rem; margin: 1.5rem 0; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
footer { color: var(--muted); margin-top: 2rem; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use gradecalc_core::model::{AggregationResult, Mode};

    fn make_test_report() -> DetailedReport {
        DetailedReport::from_result(
            Mode::Cgpa,
            &AggregationResult {
                value: 3.47,
                total_credits: 18.0,
                count_valid: 2,
            },
        )
        .with_title(Some("Year <1> & 2".into()))
    }

    #[test]
    fn html_report_contains_required_elements() {
        let report = make_test_report();
        let html = generate_html(&report);

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Your CGPA"));
        assert!(html.contains("3.47"));
        assert!(html.contains("Valid Semesters"));
        assert!(html.contains("Generated by CGPA Calculator"));
        assert!(html.contains("ring-fill"));
    }

    #[test]
    fn html_escapes_user_text() {
        let html = generate_html(&make_test_report());
        assert!(html.contains("Year &lt;1&gt; &amp; 2"));
        assert!(!html.contains("Year <1>"));
    }

    #[test]
    fn page_title_uses_plain_separator() {
        let html = generate_html(&make_test_report());
        assert!(html.contains("<title>CGPA Calculator - Year &lt;1&gt; &amp; 2</title>"));
        assert!(!html.contains('\u{2014}'));
    }

    #[test]
    fn ring_offset_tracks_value() {
        let full = generate_ring(4.0, "GPA");
        assert!(full.contains("stroke-dashoffset=\"0.00\""));
        let empty = generate_ring(0.0, "GPA");
        assert!(empty.contains(&format!(
            "stroke-dashoffset=\"{:.2}\"",
            ring_circumference()
        )));
    }

    #[test]
    fn html_report_write_to_file() {
        let report = make_test_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");

        write_html_report(&report, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
