//! Input parsing for Cucumber JSON reports and run-attempt files.
//!
//! The reporter itself only consumes the domain model in [`crate::types`];
//! this module builds that model from the files a test runner leaves
//! behind.
//!
//! # Example
//!
//! ```rust,no_run
//! use scenario_report::parser::{parse_run_results_file, CucumberParser};
//!
//! # fn main() -> scenario_report::Result<()> {
//! let features = CucumberParser::new().parse_paths(&["target/cucumber-reports"])?;
//! let runs = parse_run_results_file("target/run-results.json")?;
//! println!("{} features, {} run attempts", features.len(), runs.len());
//! # Ok(())
//! # }
//! ```

mod cucumber;
mod runs;

pub use cucumber::CucumberParser;
pub use runs::{parse_run_results, parse_run_results_file};

/// File extension of Cucumber JSON reports.
pub const REPORT_EXTENSION: &str = "json";
