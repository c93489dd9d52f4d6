//! Run-result files.
//!
//! A run-result file is a JSON array of attempts:
//!
//! ```json
//! [{"feature_uri": "features/login.feature:12", "status": "RERUN"}]
//! ```

use crate::error::{Result, ResultExt};
use crate::types::RunResult;
use std::path::Path;

/// Parse run results from a JSON string. Empty input yields no attempts.
///
/// # Errors
///
/// Returns an error if `content` is not an array of run results.
pub fn parse_run_results(content: &str) -> Result<Vec<RunResult>> {
    parse(content, "<string>")
}

/// Parse a run-result file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is malformed.
pub fn parse_run_results_file(path: impl AsRef<Path>) -> Result<Vec<RunResult>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).with_path(path)?;
    let results = parse(&content, &path.display().to_string())?;
    tracing::debug!(path = %path.display(), attempts = results.len(), "Parsed run results");
    Ok(results)
}

fn parse(content: &str, input: &str) -> Result<Vec<RunResult>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(content).map_err(|e| {
        crate::err!(InputParse {
            input: input.to_string(),
            message: e.to_string(),
        })
    })
}
