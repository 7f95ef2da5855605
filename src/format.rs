//! Markdown table rendering for coverage records.
//!
//! Formatting must be deterministic: the rendered text participates in the
//! published comment body, and identical input has to yield byte-identical
//! output so repeated publishes converge.

use std::fmt::Write;

use crate::model::{CoverageRecord, FileCoverage};

/// A rendered table plus the pass flag derived from its rows.
pub struct Table {
    pub text: String,
    pub pass: bool,
}

/// Render a ratio as a whole percentage, ties rounding half-up.
#[must_use]
pub fn to_percent(ratio: f64) -> String {
    format!("{}%", (ratio * 100.0).round() as i64)
}

fn glyph(pass: bool) -> &'static str {
    if pass {
        "✅"
    } else {
        "❌"
    }
}

/// Render the aggregate coverage record as a one-row table.
#[must_use]
pub fn format_average_table(cover: &CoverageRecord) -> Table {
    let pass = cover.pass();
    let mut text = String::new();
    text.push_str("| Lines | Covered | Coverage | Threshold | Status |\n");
    text.push_str("|------:|--------:|---------:|----------:|:------:|\n");
    writeln!(
        text,
        "| {} | {} | {} | {} | {} |",
        cover.total,
        cover.covered,
        to_percent(cover.ratio),
        to_percent(cover.threshold),
        glyph(pass)
    )
    .unwrap();
    Table { text, pass }
}

/// Render per-file coverage rows in input order.
///
/// The pass flag is the AND over all rows, vacuously true for an empty
/// slice — the caller decides whether an empty set should render a
/// placeholder instead of an empty table.
#[must_use]
pub fn format_files_table(files: &[FileCoverage]) -> Table {
    let pass = files.iter().all(|f| f.pass);
    let mut text = String::new();
    text.push_str("| File | Coverage | Status |\n");
    text.push_str("|:-----|---------:|:------:|\n");
    for file in files {
        writeln!(
            text,
            "| `{}` | {} | {} |",
            file.path,
            to_percent(file.ratio),
            glyph(file.pass)
        )
        .unwrap();
    }
    Table { text, pass }
}
