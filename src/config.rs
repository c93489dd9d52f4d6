//! Configuration module for scenario-report.
//!
//! This module handles loading and validating configuration from:
//! - YAML configuration files (`scenario-report.yaml`)
//! - Environment variables
//! - CLI arguments
//!
//! # Configuration File Format
//!
//! ```yaml
//! # scenario-report.yaml
//!
//! # Report options
//! report:
//!   title: "Nightly Regression"
//!   environment_info: "browser=chrome;build=${BUILD_NUMBER}"
//!   templates_dir: ./report-templates
//!
//! # Output options
//! output:
//!   write_images: true
//!   images_dir: images
//!   colored: true
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default configuration file names, in lookup order.
pub const DEFAULT_CONFIG_FILES: [&str; 3] = [
    "scenario-report.yaml",
    "scenario-report.yml",
    ".scenario-report.yaml",
];

/// Report content options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Page title.
    pub title: String,

    /// Raw `key=value;key=value` environment description.
    pub environment_info: String,

    /// Directory of `<name>.hbs` files overriding the built-in templates.
    pub templates_dir: Option<PathBuf>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: default_title(),
            environment_info: String::new(),
            templates_dir: None,
        }
    }
}

/// Output options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Write decoded image embeddings next to the report.
    #[serde(default = "default_true")]
    pub write_images: bool,

    /// Image directory, relative to the report file.
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,

    /// Use colored output in the terminal summary.
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            write_images: true,
            images_dir: default_images_dir(),
            colored: true,
        }
    }
}

/// Main configuration structure with nested sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Report options
    pub report: ReportOptions,

    /// Output options
    pub output: OutputOptions,
}

fn default_title() -> String {
    "Test Execution Report".to_string()
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("images")
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a YAML string.
    ///
    /// `${VAR}` and `$VAR` references are expanded from the environment
    /// before parsing. Unset variables are left as written.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or a value is out of range.
    pub fn from_yaml(content: &str) -> Result<Self> {
        tracing::debug!("Parsing configuration from YAML");
        let expanded = expand_env_vars(content)?;

        let config: Config = serde_yaml::from_str(&expanded).map_err(|e| {
            crate::error::ReportError::config_parse(
                e.to_string(),
                Some(Box::new(e)),
                file!(),
                line!(),
            )
        })?;
        config.validate()?;

        tracing::debug!(
            title = %config.report.title,
            templates_dir = ?config.report.templates_dir,
            write_images = config.output.write_images,
            "Configuration loaded successfully"
        );
        Ok(config)
    }

    /// Check values that parse but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigValue` error naming the offending key.
    pub fn validate(&self) -> Result<()> {
        if self.report.title.trim().is_empty() {
            return Err(crate::err!(ConfigValue {
                key: "report.title".to_string(),
                message: "title must not be empty".to_string(),
            }));
        }
        if self.output.images_dir.as_os_str().is_empty() {
            return Err(crate::err!(ConfigValue {
                key: "output.images_dir".to_string(),
                message: "images directory must not be empty".to_string(),
            }));
        }
        if self.output.images_dir.is_absolute() {
            return Err(crate::err!(ConfigValue {
                key: "output.images_dir".to_string(),
                message: "images directory must be relative to the report".to_string(),
            }));
        }
        Ok(())
    }

    /// Generate an example YAML configuration.
    #[must_use]
    pub fn example_yaml() -> String {
        r#"# scenario-report configuration file

# Report options
report:
  # Page title
  title: "Test Execution Report"

  # Environment details shown in the Environment modal.
  # Semicolon-separated key=value pairs; malformed entries are skipped.
  # Environment variables are expanded.
  # environment_info: "browser=chrome;os=linux;build=${BUILD_NUMBER}"

  # Directory with template overrides (feature.hbs, scenario.hbs, modal.hbs,
  # modal_row.hbs, modal_step.hbs, modal_environment.hbs)
  # templates_dir: ./report-templates

# Output options
output:
  # Write decoded screenshots next to the report
  write_images: true

  # Screenshot directory, relative to the report file. The built-in
  # modal_step template links to images/; override it when changing this.
  images_dir: images

  # Use colored output in terminal
  colored: true
"#
        .to_string()
    }

    /// Merge CLI arguments into the configuration.
    pub fn merge_cli_args(&mut self, args: &crate::cli::RenderArgs) {
        if let Some(ref title) = args.title {
            self.report.title = title.clone();
        }
        if let Some(ref environment_info) = args.env_info {
            self.report.environment_info = environment_info.clone();
        }
        if let Some(ref templates) = args.templates {
            self.report.templates_dir = Some(templates.clone());
        }
        if args.no_images {
            self.output.write_images = false;
        }
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
fn expand_env_vars(content: &str) -> Result<String> {
    let re = regex::Regex::new(r"\$\{([^}]+)\}|\$([A-Za-z_][A-Za-z0-9_]*)").map_err(|e| {
        crate::err!(Internal {
            message: format!("invalid environment variable pattern: {e}"),
        })
    })?;

    let expanded = re.replace_all(content, |caps: &regex::Captures<'_>| {
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map_or("", |m| m.as_str());
        std::env::var(name).unwrap_or_else(|_| caps[0].to_string())
    });
    Ok(expanded.into_owned())
}
