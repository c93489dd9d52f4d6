//! Core data types used throughout scenario-report.
//!
//! This module defines the read-only result tree handed to the renderer:
//! - Features, scenarios, steps and hooks
//! - Step/hook results and embedded artifacts
//! - Run attempts used for rerun correlation
//! - Aggregate summary counts
//!
//! The tree is built once (usually by [`crate::parser::CucumberParser`]) and
//! is never mutated by the reporter.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::time::Duration;

/// Keyword of the structural pseudo-scenario that is never reported.
pub const BACKGROUND_KEYWORD: &str = "Background";

/// Canonical status string of a passing step or hook.
pub const STATUS_PASSED: &str = "passed";

/// Canonical status string of a failing step or hook.
pub const STATUS_FAILED: &str = "failed";

/// Outcome of a single step or hook execution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepResult {
    /// Raw status as emitted by the runner (e.g. "passed", "FAILED", "skipped")
    pub status: String,
    /// Execution time
    pub duration: Duration,
    /// Error message; `None` or an empty string means no error
    pub error_message: Option<String>,
}

impl StepResult {
    /// Create a result without an error message.
    #[must_use]
    pub fn new(status: impl Into<String>, duration: Duration) -> Self {
        Self {
            status: status.into(),
            duration,
            error_message: None,
        }
    }

    /// Attach an error message.
    #[must_use]
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Whether the status is "passed", compared case-insensitively.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status.eq_ignore_ascii_case(STATUS_PASSED)
    }

    /// The error message, if one is present and non-empty.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error_message.as_deref().filter(|m| !m.is_empty())
    }
}

/// An artifact attached to a step or hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embedding {
    /// Identifier used to reference the materialized asset
    pub id: String,
    /// MIME type (e.g. "text/html", "image/png")
    pub mime_type: String,
    /// Base64-encoded payload
    pub data: String,
}

impl Embedding {
    /// Whether this embedding carries inline HTML.
    #[must_use]
    pub fn is_html(&self) -> bool {
        self.mime_type == "text/html"
    }

    /// Whether this embedding is an image of any kind.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image")
    }
}

/// Tabular argument attached to a step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataTable {
    /// Rows of cells, in source order
    pub rows: Vec<Vec<String>>,
}

/// One executable line within a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Step {
    /// Step text (without keyword)
    pub name: String,
    /// Gherkin keyword ("Given ", "When ", ...)
    pub keyword: String,
    /// Execution result
    pub result: StepResult,
    /// Optional data table
    pub rows: Option<DataTable>,
    /// Console output captured while the step ran
    pub output: Vec<String>,
    /// Attached artifacts
    pub embeddings: Vec<Embedding>,
}

impl Step {
    /// Create a step with no table, output or embeddings.
    #[must_use]
    pub fn new(name: impl Into<String>, result: StepResult) -> Self {
        Self {
            name: name.into(),
            result,
            ..Self::default()
        }
    }
}

/// A before/after action wrapped around a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Hook {
    /// Source location of the hook method
    pub location: String,
    /// Execution result
    pub result: StepResult,
    /// Console output captured while the hook ran
    pub output: Vec<String>,
    /// Attached artifacts
    pub embeddings: Vec<Embedding>,
}

impl Hook {
    /// Create a hook with no output or embeddings.
    #[must_use]
    pub fn new(location: impl Into<String>, result: StepResult) -> Self {
        Self {
            location: location.into(),
            result,
            ..Self::default()
        }
    }
}

/// One reportable test case (or a background pseudo-scenario).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scenario {
    /// HTML-attribute-safe identifier
    pub id: String,
    /// Scenario name
    pub name: String,
    /// Gherkin keyword ("Scenario", "Scenario Outline", "Background", ...)
    pub keyword: String,
    /// Source line of the scenario
    pub line: u32,
    /// URI of the owning feature file
    pub feature_uri: String,
    /// Hooks run before the steps
    pub before: Vec<Hook>,
    /// Steps in execution order
    pub steps: Vec<Step>,
    /// Hooks run after the steps
    pub after: Vec<Hook>,
}

impl Scenario {
    /// Create an empty scenario with the "Scenario" keyword.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        line: u32,
        feature_uri: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            keyword: "Scenario".to_string(),
            line,
            feature_uri: feature_uri.into(),
            ..Self::default()
        }
    }

    /// Whether this is the non-reportable background pseudo-scenario.
    #[must_use]
    pub fn is_background(&self) -> bool {
        self.keyword.eq_ignore_ascii_case(BACKGROUND_KEYWORD)
    }

    /// True iff every step and every hook passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.before.iter().all(|h| h.result.passed())
            && self.steps.iter().all(|s| s.result.passed())
            && self.after.iter().all(|h| h.result.passed())
    }

    /// Key used to correlate this scenario with run attempts.
    #[must_use]
    pub fn rerun_key(&self) -> String {
        format!("{}:{}", self.feature_uri, self.line)
    }
}

/// Top-level grouping of scenarios sharing a source file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Feature {
    /// HTML-attribute-safe identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Feature file URI
    pub uri: String,
    /// Scenarios in source order (backgrounds included)
    pub scenarios: Vec<Scenario>,
}

impl Feature {
    /// True iff every non-background scenario passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.reportable_scenarios().all(Scenario::passed)
    }

    /// Scenarios that appear in the report, in source order.
    pub fn reportable_scenarios(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter().filter(|s| !s.is_background())
    }

    /// File name portion of the URI (everything after the last `/`).
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.uri
            .rsplit_once('/')
            .map_or(self.uri.as_str(), |(_, name)| name)
    }
}

/// Status of one physical execution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// Passed on the first attempt
    Passed,
    /// Failed (no further attempts)
    Failed,
    /// Failed and was scheduled for rerun
    Rerun,
    /// Passed on a rerun attempt
    PassedAfterRerun,
}

impl Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed => write!(f, "PASSED"),
            Self::Failed => write!(f, "FAILED"),
            Self::Rerun => write!(f, "RERUN"),
            Self::PassedAfterRerun => write!(f, "PASSED_AFTER_RERUN"),
        }
    }
}

/// One execution attempt, keyed by `featureUri:line`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    /// Feature URI and scenario line, joined by `:`
    pub feature_uri: String,
    /// Attempt outcome
    pub status: RunStatus,
}

impl RunResult {
    /// Create a run result.
    #[must_use]
    pub fn new(feature_uri: impl Into<String>, status: RunStatus) -> Self {
        Self {
            feature_uri: feature_uri.into(),
            status,
        }
    }
}

/// Aggregate counts over a set of features.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    /// Number of features
    pub features: usize,
    /// Features whose reportable scenarios all passed
    pub features_passed: usize,
    /// Features with at least one failed scenario
    pub features_failed: usize,
    /// Number of reportable (non-background) scenarios
    pub scenarios: usize,
    /// Reportable scenarios that passed
    pub scenarios_passed: usize,
    /// Reportable scenarios that failed
    pub scenarios_failed: usize,
}

impl ReportSummary {
    /// Whether any feature failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.features_failed > 0
    }
}

impl From<&[Feature]> for ReportSummary {
    fn from(features: &[Feature]) -> Self {
        let mut summary = Self::default();
        for feature in features {
            summary.features += 1;
            if feature.passed() {
                summary.features_passed += 1;
            } else {
                summary.features_failed += 1;
            }
            for scenario in feature.reportable_scenarios() {
                summary.scenarios += 1;
                if scenario.passed() {
                    summary.scenarios_passed += 1;
                } else {
                    summary.scenarios_failed += 1;
                }
            }
        }
        summary
    }
}
