//! GitHub API backend for the report comment, plus the resolved CI context.

use anyhow::{bail, Context as _, Result};
use serde::Deserialize;

use crate::publish::{Comment, CommentStore};

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = "covergate";

/// Resolved CI run context, read from environment variables.
///
/// Passed explicitly into everything that needs it; nothing downstream
/// reads the environment on its own.
pub struct Context {
    token: String,
    repo: String,
    pr_number: u64,
    pub sha: Option<String>,
}

impl Context {
    /// Build a context from standard GitHub Actions environment variables
    /// (`GITHUB_TOKEN`, `GITHUB_REPOSITORY`, `GITHUB_REF`, `GITHUB_SHA`).
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("GITHUB_TOKEN")
            .context("GITHUB_TOKEN environment variable is required")?;
        let repo = std::env::var("GITHUB_REPOSITORY")
            .context("GITHUB_REPOSITORY environment variable is required")?;
        let github_ref =
            std::env::var("GITHUB_REF").context("GITHUB_REF environment variable is required")?;
        let pr_number = pr_number_from_ref(&github_ref)
            .context("could not determine PR number from GITHUB_REF")?;
        let sha = std::env::var("GITHUB_SHA").ok();
        Ok(Self {
            token,
            repo,
            pr_number,
            sha,
        })
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn pr_number(&self) -> u64 {
        self.pr_number
    }
}

/// Extract PR number from a ref like "refs/pull/42/merge" → 42.
fn pr_number_from_ref(github_ref: &str) -> Option<u64> {
    let parts: Vec<&str> = github_ref.split('/').collect();
    if parts.len() >= 3 && parts[0] == "refs" && parts[1] == "pull" {
        parts[2].parse().ok()
    } else {
        None
    }
}

#[derive(Deserialize)]
struct ApiComment {
    id: u64,
    body: Option<String>,
}

/// Blocking GitHub REST client for the issue comments of one PR.
pub struct GitHubApi<'a> {
    context: &'a Context,
}

impl<'a> GitHubApi<'a> {
    pub fn new(context: &'a Context) -> Self {
        Self { context }
    }

    fn get(&self, url: &str) -> ureq::Request {
        ureq::get(url)
            .set("Authorization", &format!("Bearer {}", self.context.token))
            .set("Accept", "application/vnd.github+json")
            .set("User-Agent", USER_AGENT)
            .set("X-GitHub-Api-Version", API_VERSION)
    }

    fn send_body(&self, request: ureq::Request, body: &str, action: &str) -> Result<()> {
        let request = request
            .set("Authorization", &format!("Bearer {}", self.context.token))
            .set("Accept", "application/vnd.github+json")
            .set("User-Agent", USER_AGENT)
            .set("X-GitHub-Api-Version", API_VERSION);
        match request.send_json(serde_json::json!({ "body": body })) {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(code, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                bail!("GitHub API error {} (HTTP {}): {}", action, code, body);
            }
            Err(e) => bail!("Failed {}: {}", action, e),
        }
    }
}

impl CommentStore for GitHubApi<'_> {
    fn list_comments(&self) -> Result<Vec<Comment>> {
        let mut comments = Vec::new();
        let mut page = 1u32;
        loop {
            let url = format!(
                "https://api.github.com/repos/{}/issues/{}/comments?per_page=100&page={}",
                self.context.repo, self.context.pr_number, page
            );
            let resp = self.get(&url).call().context("Failed to list PR comments")?;

            let batch: Vec<ApiComment> =
                resp.into_json().context("Failed to parse comments JSON")?;
            if batch.is_empty() {
                break;
            }
            comments.extend(batch.into_iter().map(|c| Comment {
                id: c.id,
                body: c.body,
            }));
            page += 1;
        }
        Ok(comments)
    }

    fn create_comment(&self, body: &str) -> Result<()> {
        let url = format!(
            "https://api.github.com/repos/{}/issues/{}/comments",
            self.context.repo, self.context.pr_number
        );
        self.send_body(ureq::post(&url), body, "creating comment")?;
        eprintln!(
            "Comment posted to {}/pull/{}",
            self.context.repo, self.context.pr_number
        );
        Ok(())
    }

    fn update_comment(&self, comment_id: u64, body: &str) -> Result<()> {
        let url = format!(
            "https://api.github.com/repos/{}/issues/comments/{}",
            self.context.repo, comment_id
        );
        self.send_body(ureq::patch(&url), body, "updating comment")?;
        eprintln!(
            "Comment {} updated on {}/pull/{}",
            comment_id, self.context.repo, self.context.pr_number
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pr_number_from_merge_ref() {
        assert_eq!(pr_number_from_ref("refs/pull/42/merge"), Some(42));
        assert_eq!(pr_number_from_ref("refs/pull/1/head"), Some(1));
    }

    #[test]
    fn test_pr_number_from_branch_ref() {
        assert_eq!(pr_number_from_ref("refs/heads/main"), None);
        assert_eq!(pr_number_from_ref("refs/tags/v1.0"), None);
        assert_eq!(pr_number_from_ref(""), None);
    }

    #[test]
    fn test_pr_number_non_numeric() {
        assert_eq!(pr_number_from_ref("refs/pull/abc/merge"), None);
    }
}
