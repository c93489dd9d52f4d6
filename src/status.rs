//! Status classification for badges and result labels.
//!
//! Leaf results (steps and hooks) are classified generically from their raw
//! status string. Scenario labels additionally take the run attempts into
//! account so reruns show up as "Passed after Rerun" / "Failed after Rerun".

use crate::types::{RunResult, RunStatus, Scenario, StepResult, STATUS_FAILED, STATUS_PASSED};
use std::collections::HashMap;
use std::fmt::Display;

/// Label of a passing feature or scenario.
pub const PASSED: &str = "Passed";
/// Label of a scenario that passed on a rerun attempt.
pub const PASSED_AFTER_RERUN: &str = "Passed after Rerun";
/// Label of a failing feature or scenario.
pub const FAILED: &str = "Failed";
/// Label of a failing scenario in a run that performed reruns.
pub const FAILED_AFTER_RERUN: &str = "Failed after Rerun";

/// Visual class of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Badge {
    /// Passed
    Success,
    /// Failed
    Danger,
    /// Anything else (skipped, pending, undefined, ...)
    Warning,
}

impl Badge {
    /// CSS class name of the badge.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Warning => "warning",
        }
    }

    /// Success when `passed`, danger otherwise.
    #[must_use]
    pub const fn from_passed(passed: bool) -> Self {
        if passed {
            Self::Success
        } else {
            Self::Danger
        }
    }
}

impl Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Badge class for a step or hook result.
#[must_use]
pub fn badge_class(result: &StepResult) -> Badge {
    badge_for_status(&result.status)
}

/// Badge class for a raw status string.
#[must_use]
pub fn badge_for_status(status: &str) -> Badge {
    if status.eq_ignore_ascii_case(STATUS_PASSED) {
        Badge::Success
    } else if status.eq_ignore_ascii_case(STATUS_FAILED) {
        Badge::Danger
    } else {
        Badge::Warning
    }
}

/// Human label for a step or hook result.
#[must_use]
pub fn status_label(result: &StepResult) -> String {
    capitalize(&result.status)
}

/// Upper-case the first character, leaving the rest untouched.
#[must_use]
pub fn capitalize(status: &str) -> String {
    let mut chars = status.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Feature-level label. Features never get a rerun qualifier.
#[must_use]
pub const fn aggregate_label(passed: bool) -> &'static str {
    if passed {
        PASSED
    } else {
        FAILED
    }
}

/// Run attempts grouped by their `featureUri:line` key.
///
/// Built once per render pass; lookups are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct RerunIndex {
    has_reruns: bool,
    by_key: HashMap<String, Vec<RunStatus>>,
}

impl RerunIndex {
    /// Index the given run attempts.
    #[must_use]
    pub fn new(run_results: &[RunResult]) -> Self {
        let mut by_key: HashMap<String, Vec<RunStatus>> = HashMap::new();
        let mut has_reruns = false;
        for run in run_results {
            has_reruns |= run.status == RunStatus::Rerun;
            by_key
                .entry(fold_key(&run.feature_uri))
                .or_default()
                .push(run.status);
        }
        Self { has_reruns, by_key }
    }

    /// Whether any attempt in the whole run was a rerun.
    #[must_use]
    pub fn has_reruns(&self) -> bool {
        self.has_reruns
    }

    /// Statuses recorded for a key, in input order.
    #[must_use]
    pub fn statuses(&self, key: &str) -> &[RunStatus] {
        self.by_key
            .get(&fold_key(key))
            .map_or(&[], Vec::as_slice)
    }

    fn passed_after_rerun(&self, key: &str) -> bool {
        self.statuses(key).contains(&RunStatus::PassedAfterRerun)
    }
}

/// Case-fold a run key one character at a time: upper-case, then
/// lower-case, using single-character mappings only. Characters whose
/// mapping expands (`ß` → `SS`) stay as they are; an expanding lower-case
/// mapping keeps its first character (`İ` → `i`).
fn fold_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            let mut upper = c.to_uppercase();
            let upper = match (upper.next(), upper.next()) {
                (Some(u), None) => u,
                _ => c,
            };
            upper.to_lowercase().next().unwrap_or(upper)
        })
        .collect()
}

/// Rerun-aware label for a reportable scenario.
///
/// Once any rerun happened in the run, every failing scenario reads
/// "Failed after Rerun". A passing scenario only reads "Passed after Rerun"
/// when its own `featureUri:line` key has a `PASSED_AFTER_RERUN` attempt.
#[must_use]
pub fn scenario_label(scenario: &Scenario, index: &RerunIndex) -> &'static str {
    let passed = scenario.passed();
    let label = match (passed, index.has_reruns()) {
        (false, true) => FAILED_AFTER_RERUN,
        (true, true) if index.passed_after_rerun(&scenario.rerun_key()) => PASSED_AFTER_RERUN,
        _ => aggregate_label(passed),
    };
    tracing::trace!(scenario = %scenario.id, label, "Scenario label resolved");
    label
}
