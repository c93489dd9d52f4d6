//! Command-line interface module.
//!
//! This module defines the CLI structure using Clap, including
//! all commands, arguments, and options.
//!
//! # Commands
//!
//! - `render`: Render Cucumber JSON reports to a self-contained HTML page
//! - `summary`: Print a terminal summary of the same reports
//! - `init`: Create an example configuration file
//! - `validate`: Validate a configuration file
//!
//! # Example Usage
//!
//! ```bash
//! # Render every report under a directory
//! scenario-report render target/cucumber-reports -o report/index.html
//!
//! # Include rerun outcomes and environment details
//! scenario-report render cucumber.json --run-results runs.json \
//!     --env-info "browser=chrome;os=linux" -o report.html
//!
//! # Terminal summary (exit code 2 on failures)
//! scenario-report summary cucumber.json
//!
//! # Initialize configuration
//! scenario-report init
//!
//! # Validate configuration
//! scenario-report validate scenario-report.yaml
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// scenario-report - HTML reports for Cucumber test results.
#[derive(Parser, Debug)]
#[command(
    name = "scenario-report",
    author,
    version,
    about = "HTML reports for Cucumber test results",
    long_about = "scenario-report reads Cucumber JSON reports and renders a self-contained \
                  HTML page with per-feature scenario tables, step-level detail modals, \
                  rerun-aware status labels and embedded screenshots."
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "SCENARIO_REPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render Cucumber JSON reports to HTML
    #[command(visible_alias = "r")]
    Render(RenderArgs),

    /// Print a terminal summary of Cucumber JSON reports
    Summary(SummaryArgs),

    /// Create an example configuration file
    Init,

    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Arguments for the render command.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Cucumber JSON report files or directories
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// JSON file of execution attempts used for rerun labels
    #[arg(long, value_name = "FILE")]
    pub run_results: Option<PathBuf>,

    /// Environment details as `key=value;key=value`
    #[arg(long, value_name = "INFO", env = "SCENARIO_REPORT_ENV_INFO")]
    pub env_info: Option<String>,

    /// Page title
    #[arg(long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Directory of template overrides (`<name>.hbs`)
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Do not write decoded image embeddings
    #[arg(long)]
    pub no_images: bool,

    /// Output file path (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the summary command.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Cucumber JSON report files or directories
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// JSON file of execution attempts used for rerun labels
    #[arg(long, value_name = "FILE")]
    pub run_results: Option<PathBuf>,
}

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(value_name = "FILE", default_value = "scenario-report.yaml")]
    pub file: PathBuf,
}
