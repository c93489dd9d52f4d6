//! Report generation module.
//!
//! The core of the crate lives here:
//! - [`HtmlReportBuilder`]: result tree → feature rows and modals
//! - [`TemplateRenderer`] / [`HandlebarsRenderer`]: the template boundary
//! - environment info parsing
//!
//! Around it sit the page shell ([`ReportDocument`]), image asset writing
//! and the plain text summary used by the CLI.
//!
//! # Example
//!
//! ```rust,no_run
//! use scenario_report::reporter::{HandlebarsRenderer, HtmlReportBuilder};
//!
//! # fn main() -> scenario_report::Result<()> {
//! let renderer = HandlebarsRenderer::new()?;
//! let builder = HtmlReportBuilder::new(&renderer);
//!
//! let features = Vec::new();
//! let rows = builder.build_feature_rows(&features, &[])?;
//! let modals = builder.build_modals(&features, "browser=chrome;env=ci")?;
//! assert!(rows.is_empty());
//! assert_eq!(modals.len(), 1);
//! # Ok(())
//! # }
//! ```

mod assets;
mod document;
mod environment;
mod html;
pub mod model;
mod templates;
mod text;

use crate::config::Config;
use crate::error::Result;
use crate::types::{Feature, ReportSummary, RunResult};

pub use assets::write_image_assets;
pub use document::ReportDocument;
pub use environment::{environment_rows, parse_environment_info, NO_ENVIRONMENT_INFO};
pub use html::{embedding_blocks, format_duration, step_view, HtmlReportBuilder};
pub use templates::{HandlebarsRenderer, Template, TemplateRenderer, TEMPLATE_EXTENSION};
pub use text::TextSummary;

/// Renders complete reports according to a [`Config`].
pub struct Reporter {
    config: Config,
    renderer: HandlebarsRenderer,
}

impl Reporter {
    /// Create a reporter, loading template overrides if configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the template directory cannot be read or a
    /// template fails to compile.
    pub fn new(config: &Config) -> Result<Self> {
        let renderer = match &config.report.templates_dir {
            Some(dir) => HandlebarsRenderer::with_templates_dir(dir)?,
            None => HandlebarsRenderer::new()?,
        };
        Ok(Self {
            config: config.clone(),
            renderer,
        })
    }

    /// Render the full self-contained HTML page.
    ///
    /// # Errors
    ///
    /// Returns an error if any fragment fails to render.
    pub fn render_html(&self, features: &[Feature], run_results: &[RunResult]) -> Result<String> {
        let builder = HtmlReportBuilder::new(&self.renderer);
        let feature_rows = builder.build_feature_rows(features, run_results)?;
        let modals = builder.build_modals(features, &self.config.report.environment_info)?;

        let document = ReportDocument {
            title: &self.config.report.title,
            summary: ReportSummary::from(features),
            feature_rows: &feature_rows,
            modals: &modals,
        };
        Ok(document.render())
    }

    /// Render the plain text summary table.
    #[must_use]
    pub fn render_text(&self, features: &[Feature], run_results: &[RunResult]) -> String {
        TextSummary::new(self.config.output.colored).render(features, run_results)
    }
}

/// Escape HTML special characters.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(html_escape("key = value"), "key = value");
    }

    #[test]
    fn test_reporter_renders_empty_document() {
        let reporter = Reporter::new(&Config::default()).unwrap();
        let html = reporter.render_html(&[], &[]).unwrap();
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains(NO_ENVIRONMENT_INFO));
    }
}
