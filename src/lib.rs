//! # scenario-report
//!
//! HTML reports for Cucumber test results.
//!
//! scenario-report reads Cucumber JSON reports and renders a self-contained
//! HTML page: one expandable row per feature, one clickable row per
//! scenario, and a modal per scenario with step-level detail.
//!
//! ## Features
//!
//! - **Rerun-aware labels**: scenarios that only passed on a rerun are
//!   marked "Passed after Rerun", failures in a run with reruns are marked
//!   "Failed after Rerun"
//! - **Step detail**: durations, error messages, captured output, data
//!   tables, and embedded HTML snippets and screenshots
//! - **Environment modal**: `key=value;key=value` run details
//! - **Replaceable templates**: every fragment goes through a
//!   [`reporter::TemplateRenderer`]; the built-in Handlebars templates can
//!   be overridden from a directory
//! - **Terminal summary**: the same classification as a table
//!
//! ## Example
//!
//! ```rust,no_run
//! use scenario_report::{Config, ReportLoader};
//! use scenario_report::reporter::Reporter;
//!
//! fn main() -> anyhow::Result<()> {
//!     let loaded = ReportLoader::new().load(&["target/cucumber-reports"], None)?;
//!
//!     let reporter = Reporter::new(&Config::default())?;
//!     let html = reporter.render_html(&loaded.features, &loaded.run_results)?;
//!     std::fs::write("report.html", html)?;
//!
//!     Ok(())
//! }
//! ```

#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod reporter;
pub mod status;
pub mod types;

// Re-export commonly used types at crate root
pub use config::Config;
pub use error::{ReportError, Result};
pub use types::{
    DataTable, Embedding, Feature, Hook, ReportSummary, RunResult, RunStatus, Scenario, Step,
    StepResult,
};

use std::path::Path;

/// Parsed input for one report: the result tree and the run attempts.
#[derive(Debug, Clone, Default)]
pub struct LoadedReport {
    /// Features in input order
    pub features: Vec<Feature>,
    /// Execution attempts (empty when no run-result file was given)
    pub run_results: Vec<RunResult>,
}

impl LoadedReport {
    /// Aggregate counts over the loaded features.
    #[must_use]
    pub fn summary(&self) -> ReportSummary {
        ReportSummary::from(self.features.as_slice())
    }
}

/// Loads Cucumber reports and run-result files.
///
/// The `ReportLoader` is the primary entry point for using scenario-report
/// as a library. It resolves report paths, parses them into the domain
/// model, and attaches the optional run attempts.
///
/// # Example
///
/// ```rust,no_run
/// use scenario_report::ReportLoader;
///
/// fn main() -> anyhow::Result<()> {
///     let loaded = ReportLoader::new().load(
///         &["cucumber.json", "rerun/cucumber.json"],
///         Some("run-results.json".as_ref()),
///     )?;
///
///     println!("Loaded {} features", loaded.features.len());
///     Ok(())
/// }
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportLoader {
    parser: parser::CucumberParser,
}

impl ReportLoader {
    /// Create a new loader.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parser: parser::CucumberParser::new(),
        }
    }

    /// Load report files or directories and an optional run-result file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A path doesn't exist or isn't readable
    /// - A report or run-result file is malformed
    pub fn load<P: AsRef<Path>>(
        &self,
        paths: &[P],
        run_results: Option<&Path>,
    ) -> Result<LoadedReport> {
        for path in paths {
            tracing::info!(path = %path.as_ref().display(), "Loading reports");
        }
        let features = self.parser.parse_paths(paths)?;

        let run_results = match run_results {
            Some(path) => parser::parse_run_results_file(path)?,
            None => Vec::new(),
        };

        tracing::debug!(
            features = features.len(),
            run_results = run_results.len(),
            "Reports loaded"
        );
        Ok(LoadedReport {
            features,
            run_results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_path() {
        let err = ReportLoader::new()
            .load(&["/no/such/cucumber.json"], None)
            .unwrap_err();
        assert!(matches!(err, ReportError::FileNotFound { .. }));
    }

    #[test]
    fn test_load_with_run_results() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("cucumber.json");
        std::fs::write(
            &report,
            r#"[{"uri": "a.feature", "name": "A", "elements": [
                {"name": "S", "keyword": "Scenario", "line": 3, "steps": [
                    {"name": "x", "keyword": "Given ", "result": {"status": "failed"}}
                ]}
            ]}]"#,
        )
        .unwrap();
        let runs = dir.path().join("runs.json");
        std::fs::write(&runs, r#"[{"feature_uri": "a.feature:3", "status": "RERUN"}]"#).unwrap();

        let loaded = ReportLoader::new().load(&[&report], Some(runs.as_path())).unwrap();
        assert_eq!(loaded.features.len(), 1);
        assert_eq!(loaded.run_results.len(), 1);
        assert!(loaded.summary().has_failures());
    }
}
