use std::cell::RefCell;
use std::path::PathBuf;

use anyhow::Result;
use tempfile::TempDir;

use covergate::model::{CoverageRecord, CoverageSummary, FileCoverage};
use covergate::publish::{Comment, CommentStore};

/// Write a coverage summary JSON file into a fresh temp directory.
/// The caller must hold onto `TempDir` to keep the file alive.
pub fn write_summary_file(json: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coverage.json");
    std::fs::write(&path, json).unwrap();
    (dir, path)
}

pub fn record(ratio: f64, covered: u64, total: u64, threshold: f64) -> CoverageRecord {
    CoverageRecord {
        ratio,
        covered,
        total,
        threshold,
    }
}

pub fn file(path: &str, ratio: f64, pass: bool) -> FileCoverage {
    FileCoverage {
        path: path.to_string(),
        ratio,
        pass,
    }
}

pub fn summary(average: CoverageRecord) -> CoverageSummary {
    CoverageSummary {
        average,
        new_files: None,
        modified_files: None,
    }
}

/// In-memory comment store for exercising the publish flow end to end.
pub struct MemoryStore {
    pub comments: RefCell<Vec<(u64, String)>>,
    next_id: RefCell<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            comments: RefCell::new(Vec::new()),
            next_id: RefCell::new(1),
        }
    }

    pub fn seed(&self, body: &str) -> u64 {
        let id = self.take_id();
        self.comments.borrow_mut().push((id, body.to_string()));
        id
    }

    fn take_id(&self) -> u64 {
        let mut next = self.next_id.borrow_mut();
        let id = *next;
        *next += 1;
        id
    }
}

impl CommentStore for MemoryStore {
    fn list_comments(&self) -> Result<Vec<Comment>> {
        Ok(self
            .comments
            .borrow()
            .iter()
            .map(|(id, body)| Comment {
                id: *id,
                body: Some(body.clone()),
            })
            .collect())
    }

    fn create_comment(&self, body: &str) -> Result<()> {
        let id = self.take_id();
        self.comments.borrow_mut().push((id, body.to_string()));
        Ok(())
    }

    fn update_comment(&self, comment_id: u64, body: &str) -> Result<()> {
        let mut comments = self.comments.borrow_mut();
        let entry = comments
            .iter_mut()
            .find(|(id, _)| *id == comment_id)
            .expect("updating unknown comment");
        entry.1 = body.to_string();
        Ok(())
    }
}
