//! Assembles the final report body published to the pull request.

use std::fmt::Write;

use crate::verdict::Scorecard;

/// Fixed report header. Comment lookup matches on this exact literal as a
/// body prefix, so it must never be templated or localized.
pub const REPORT_TITLE: &str = "# ☂️ Repo Coverage";

const ATTRIBUTION: &str = "[covergate](https://github.com/covergate/covergate)";

/// Compose the full report body: title, status line, one `##` heading per
/// section, and a trailing attribution line with the abbreviated head
/// commit SHA (`unknown` when the run has no PR head SHA).
#[must_use]
pub fn compose(card: &Scorecard, sha: Option<&str>) -> String {
    let mut body = String::from(REPORT_TITLE);

    let status = if card.pass { "✅" } else { "❌" };
    write!(body, "\n> current status: {status}").unwrap();

    for section in &card.sections {
        write!(body, "\n## {}\n{}", section.label, section.body).unwrap();
    }

    let short_sha = match sha {
        Some(sha) if sha.len() > 7 => &sha[..7],
        Some(sha) => sha,
        None => "unknown",
    };
    write!(
        body,
        "\n\n\n> **updated for commit: `{short_sha}` by {ATTRIBUTION}**"
    )
    .unwrap();

    body
}
