//! In-memory representation of the coverage summary consumed by the gate,
//! independent of whichever tool produced it. The summary is deserialized
//! from JSON and validated once at load time; everything downstream can
//! trust the invariants checked here.

use serde::Deserialize;

use crate::error::{GateError, Result};

/// Aggregate coverage for the whole codebase.
///
/// `ratio` is supplied by the upstream tool and formatted as given; it is
/// never recomputed from `covered`/`total`.
#[derive(Debug, Clone, Deserialize)]
pub struct CoverageRecord {
    pub ratio: f64,
    pub covered: u64,
    pub total: u64,
    pub threshold: f64,
}

impl CoverageRecord {
    /// Whether this record meets its threshold.
    #[must_use]
    pub fn pass(&self) -> bool {
        self.ratio >= self.threshold
    }

    pub fn validate(&self) -> Result<()> {
        if self.total == 0 {
            return Err(GateError::Validation(
                "aggregate coverage has zero total lines".to_string(),
            ));
        }
        if self.covered > self.total {
            return Err(GateError::Validation(format!(
                "covered lines ({}) exceed total lines ({})",
                self.covered, self.total
            )));
        }
        check_ratio("ratio", self.ratio)?;
        check_ratio("threshold", self.threshold)?;
        Ok(())
    }
}

/// Coverage attributed to one file that is new or modified in the PR.
///
/// `pass` is supplied by the upstream tool — per-file policy (e.g. a
/// stricter threshold for new files) is decided there, not here.
#[derive(Debug, Clone, Deserialize)]
pub struct FileCoverage {
    pub path: String,
    pub ratio: f64,
    pub pass: bool,
}

impl FileCoverage {
    pub fn validate(&self) -> Result<()> {
        if self.path.is_empty() {
            return Err(GateError::Validation(
                "file coverage entry has an empty path".to_string(),
            ));
        }
        check_ratio(&format!("ratio for '{}'", self.path), self.ratio)
    }
}

/// The complete coverage summary for one gate invocation.
///
/// `new_files`/`modified_files` are `None` when the upstream tool found no
/// such files in the PR.
#[derive(Debug, Clone, Deserialize)]
pub struct CoverageSummary {
    pub average: CoverageRecord,
    #[serde(default)]
    pub new_files: Option<Vec<FileCoverage>>,
    #[serde(default)]
    pub modified_files: Option<Vec<FileCoverage>>,
}

impl CoverageSummary {
    pub fn validate(&self) -> Result<()> {
        self.average.validate()?;
        for file in self.new_files.iter().flatten() {
            file.validate()?;
        }
        for file in self.modified_files.iter().flatten() {
            file.validate()?;
        }
        Ok(())
    }
}

fn check_ratio(what: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(GateError::Validation(format!(
            "{} must be within [0, 1], got {}",
            what, value
        )));
    }
    Ok(())
}
