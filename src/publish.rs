//! Idempotent publishing of the report: one comment per pull request,
//! updated in place, plus a mirror into the CI run's step summary.

use std::io::Write as _;
use std::path::Path;

use anyhow::{Context as _, Result};

use crate::report::REPORT_TITLE;

/// An existing comment on the pull request.
pub struct Comment {
    pub id: u64,
    pub body: Option<String>,
}

/// Remote comment storage with CRUD semantics.
///
/// Abstracts over the GitHub issues API so the reconciliation logic can be
/// exercised against an in-memory store in tests.
pub trait CommentStore {
    fn list_comments(&self) -> Result<Vec<Comment>>;
    fn create_comment(&self, body: &str) -> Result<()>;
    fn update_comment(&self, comment_id: u64, body: &str) -> Result<()>;
}

/// Find the report comment on the PR: the first comment whose body starts
/// with [`REPORT_TITLE`]. Prefix match, not equality — bodies carry the
/// title plus the report content.
pub fn find_existing_report(store: &dyn CommentStore) -> Result<Option<u64>> {
    for comment in store.list_comments()? {
        if let Some(ref body) = comment.body {
            if body.starts_with(REPORT_TITLE) {
                return Ok(Some(comment.id));
            }
        }
    }
    Ok(None)
}

/// Create or update the report comment so that repeated publishes converge
/// to exactly one comment.
///
/// Two concurrent runs on the same PR race between the lookup and the
/// write; the last writer wins and a transient duplicate is possible.
/// Callers needing strict exclusivity must serialize externally.
pub fn publish_report(store: &dyn CommentStore, body: &str) -> Result<()> {
    match find_existing_report(store)? {
        Some(comment_id) => store.update_comment(comment_id, body),
        None => store.create_comment(body),
    }
}

/// Append the report body to the step summary file at `path`.
/// Append-only per run; summaries are not deduplicated.
pub fn write_step_summary_to(path: &Path, body: &str) -> Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open step summary file {}", path.display()))?;
    writeln!(file, "{body}").context("Failed to write step summary")?;
    Ok(())
}

/// Append the report body to the file named by `$GITHUB_STEP_SUMMARY`.
pub fn write_step_summary(body: &str) -> Result<()> {
    let path = std::env::var("GITHUB_STEP_SUMMARY")
        .context("GITHUB_STEP_SUMMARY environment variable is required")?;
    write_step_summary_to(Path::new(&path), body)
}
