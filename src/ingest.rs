use std::path::Path;

use crate::error::Result;
use crate::model::CoverageSummary;

/// Read a coverage summary file, deserialize it, and validate every record.
pub fn load(path: &Path) -> Result<CoverageSummary> {
    let content = std::fs::read(path)?;
    let summary: CoverageSummary = serde_json::from_slice(&content)?;
    summary.validate()?;
    Ok(summary)
}
