//! Plain text summary for terminal output.

use crate::status::{self, Badge, RerunIndex};
use crate::types::{Feature, ReportSummary, RunResult};
use colored::Colorize;
use comfy_table::{Cell, Color, ContentArrangement, Table};

/// Terminal summary of features and scenarios.
pub struct TextSummary {
    /// Whether to use colors
    use_colors: bool,
}

impl TextSummary {
    /// Create a summary renderer.
    #[must_use]
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Render the header, one table row per reportable scenario, and the
    /// totals. Scenario labels use the same rerun rules as the HTML report.
    #[must_use]
    pub fn render(&self, features: &[Feature], run_results: &[RunResult]) -> String {
        let index = RerunIndex::new(run_results);
        let summary = ReportSummary::from(features);
        let mut output = String::new();

        output.push_str(&self.format_header());
        output.push('\n');

        let mut table = Table::new();
        table
            .load_preset(comfy_table::presets::UTF8_BORDERS_ONLY)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Feature", "Scenario", "Line", "Result"]);

        for feature in features {
            let feature_passed = feature.passed();
            table.add_row(vec![
                Cell::new(&feature.name),
                Cell::new(""),
                Cell::new(""),
                self.status_cell(Badge::from_passed(feature_passed), status::aggregate_label(feature_passed)),
            ]);
            for scenario in feature.reportable_scenarios() {
                table.add_row(vec![
                    Cell::new(""),
                    Cell::new(&scenario.name),
                    Cell::new(scenario.line),
                    self.status_cell(
                        Badge::from_passed(scenario.passed()),
                        status::scenario_label(scenario, &index),
                    ),
                ]);
            }
        }

        output.push_str(&table.to_string());
        output.push('\n');
        output.push_str(&self.format_footer(&summary));
        output
    }

    fn status_cell(&self, badge: Badge, label: &str) -> Cell {
        let cell = Cell::new(label);
        if !self.use_colors {
            return cell;
        }
        match badge {
            Badge::Success => cell.fg(Color::Green),
            Badge::Danger => cell.fg(Color::Red),
            Badge::Warning => cell.fg(Color::Yellow),
        }
    }

    fn format_header(&self) -> String {
        let title = "Scenario Report";
        let version = format!("v{}", env!("CARGO_PKG_VERSION"));

        if self.use_colors {
            format!(
                "\n{} {}\n{}\n",
                title.bright_white().bold(),
                version.dimmed(),
                "=".repeat(80).bright_blue(),
            )
        } else {
            format!("\n{} {}\n{}\n", title, version, "=".repeat(80))
        }
    }

    fn format_footer(&self, summary: &ReportSummary) -> String {
        let totals = format!(
            "  {} features ({} passed, {} failed) | {} scenarios ({} passed, {} failed)\n",
            summary.features,
            summary.features_passed,
            summary.features_failed,
            summary.scenarios,
            summary.scenarios_passed,
            summary.scenarios_failed,
        );

        let verdict = if summary.has_failures() {
            "FAILED - some scenarios failed"
        } else {
            "PASSED - all scenarios passed"
        };
        let verdict = if !self.use_colors {
            verdict.to_string()
        } else if summary.has_failures() {
            verdict.red().bold().to_string()
        } else {
            verdict.green().bold().to_string()
        };

        format!("{}\n{totals}\n  {verdict}\n", "-".repeat(80))
    }
}
