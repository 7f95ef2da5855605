//! Turns a coverage summary into report sections and an overall verdict.

use crate::format::{format_average_table, format_files_table};
use crate::model::{CoverageSummary, FileCoverage};

/// One named block of the report.
pub struct Section {
    pub label: &'static str,
    pub body: String,
    pub pass: bool,
}

/// Ordered report sections plus the overall verdict.
pub struct Scorecard {
    pub sections: Vec<Section>,
    pub pass: bool,
}

const NO_NEW_FILES: &str = "No new covered files...";
const NO_MODIFIED_FILES: &str = "No covered modified files...";

/// Compute the verdict and its sections from a coverage summary.
///
/// The verdict is a pure function of the coverage data: the AND of the
/// aggregate pass flag and the per-file sets' aggregate pass flags. Absent
/// or empty file sets render a placeholder body and contribute a vacuous
/// pass. Section order is fixed (Overall Coverage, New Files, Modified
/// Files) and is part of the published contract.
#[must_use]
pub fn score(summary: &CoverageSummary) -> Scorecard {
    let mut sections = Vec::with_capacity(3);

    let average = format_average_table(&summary.average);
    let mut pass = average.pass;
    sections.push(Section {
        label: "Overall Coverage",
        body: average.text,
        pass: average.pass,
    });

    let (new_section, new_pass) =
        files_section("New Files", summary.new_files.as_deref(), NO_NEW_FILES);
    pass = pass && new_pass;
    sections.push(new_section);

    let (modified_section, modified_pass) = files_section(
        "Modified Files",
        summary.modified_files.as_deref(),
        NO_MODIFIED_FILES,
    );
    pass = pass && modified_pass;
    sections.push(modified_section);

    Scorecard { sections, pass }
}

fn files_section(
    label: &'static str,
    files: Option<&[FileCoverage]>,
    placeholder: &str,
) -> (Section, bool) {
    match files {
        Some(files) if !files.is_empty() => {
            let table = format_files_table(files);
            let pass = table.pass;
            (
                Section {
                    label,
                    body: table.text,
                    pass,
                },
                pass,
            )
        }
        _ => (
            Section {
                label,
                body: placeholder.to_string(),
                pass: true,
            },
            true,
        ),
    }
}
