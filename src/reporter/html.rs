//! HTML fragment builder.
//!
//! Walks the result tree and renders the summary table rows (one per
//! feature) and the detail modals (environment first, then one per
//! reportable scenario). Output order always mirrors input order.

use crate::error::Result;
use crate::reporter::environment::environment_rows;
use crate::reporter::model::{
    DataTableBlock, EmbeddingBlock, EnvironmentView, ExceptionBlock, FeatureView, ModalRowView,
    ModalView, OutputBlock, ScenarioView, StepView, TableRow,
};
use crate::reporter::templates::{Template, TemplateRenderer};
use crate::status::{self, Badge, RerunIndex};
use crate::types::{DataTable, Embedding, Feature, Hook, RunResult, Scenario, Step, StepResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;
use std::time::Duration;

/// Renders report fragments through a [`TemplateRenderer`].
pub struct HtmlReportBuilder<'r, R: TemplateRenderer> {
    renderer: &'r R,
}

impl<'r, R: TemplateRenderer> HtmlReportBuilder<'r, R> {
    /// Create a builder over `renderer`.
    #[must_use]
    pub fn new(renderer: &'r R) -> Self {
        Self { renderer }
    }

    /// One summary row per feature, in input order.
    ///
    /// # Errors
    ///
    /// Propagates template rendering errors and undecodable HTML embeddings.
    pub fn build_feature_rows(
        &self,
        features: &[Feature],
        run_results: &[RunResult],
    ) -> Result<Vec<String>> {
        let index = RerunIndex::new(run_results);
        tracing::debug!(
            features = features.len(),
            run_results = run_results.len(),
            has_reruns = index.has_reruns(),
            "Building feature rows"
        );

        features
            .iter()
            .map(|feature| self.feature_row(feature, &index))
            .collect()
    }

    /// The environment modal followed by one modal per reportable scenario.
    ///
    /// # Errors
    ///
    /// Propagates template rendering errors and undecodable HTML embeddings.
    pub fn build_modals(&self, features: &[Feature], environment_info: &str) -> Result<Vec<String>> {
        let capacity = 1 + features
            .iter()
            .map(|f| f.reportable_scenarios().count())
            .sum::<usize>();
        let mut modals = Vec::with_capacity(capacity);

        modals.push(self.environment_modal(environment_info)?);
        for feature in features {
            for scenario in feature.reportable_scenarios() {
                modals.push(self.scenario_modal(feature, scenario)?);
            }
        }

        tracing::debug!(modals = modals.len(), "Built modals");
        Ok(modals)
    }

    fn feature_row(&self, feature: &Feature, index: &RerunIndex) -> Result<String> {
        let passed = feature.passed();
        let feature_scenarios = feature
            .reportable_scenarios()
            .map(|scenario| self.scenario_row(&feature.id, scenario, index))
            .collect::<Result<Vec<_>>>()?;

        self.apply(
            Template::Feature,
            &FeatureView {
                data_target: feature.id.clone(),
                feature_name: feature.name.clone(),
                feature_badge: Badge::from_passed(passed).as_str(),
                feature_result: status::aggregate_label(passed),
                feature_scenarios,
            },
        )
    }

    fn scenario_row(&self, feature_id: &str, scenario: &Scenario, index: &RerunIndex) -> Result<String> {
        self.apply(
            Template::Scenario,
            &ScenarioView {
                data_target: feature_id.to_string(),
                modal_target: scenario.id.clone(),
                scenario_name: scenario.name.clone(),
                scenario_badge: Badge::from_passed(scenario.passed()).as_str(),
                scenario_result: status::scenario_label(scenario, index),
            },
        )
    }

    fn scenario_modal(&self, feature: &Feature, scenario: &Scenario) -> Result<String> {
        let mut modal_body =
            Vec::with_capacity(scenario.before.len() + scenario.steps.len() + scenario.after.len());
        for hook in &scenario.before {
            modal_body.push(self.hook_row(hook)?);
        }
        for step in &scenario.steps {
            modal_body.push(self.step_row(step)?);
        }
        for hook in &scenario.after {
            modal_body.push(self.hook_row(hook)?);
        }

        self.apply(
            Template::Modal,
            &ModalView {
                modal_target: scenario.id.clone(),
                modal_heading: scenario.name.clone(),
                modal_feature_line: format!("{} - line {}", feature.short_name(), scenario.line),
                modal_body,
            },
        )
    }

    fn hook_row(&self, hook: &Hook) -> Result<String> {
        let view = step_view(&hook.location, &hook.result, None, &hook.output, &hook.embeddings)?;
        self.apply(Template::ModalStep, &view)
    }

    fn step_row(&self, step: &Step) -> Result<String> {
        let view = step_view(
            &step.name,
            &step.result,
            step.rows.as_ref(),
            &step.output,
            &step.embeddings,
        )?;
        self.apply(Template::ModalStep, &view)
    }

    fn environment_modal(&self, environment_info: &str) -> Result<String> {
        let modal_body = environment_rows(environment_info)
            .into_iter()
            .map(|row_info| self.apply(Template::ModalRow, &ModalRowView { row_info }))
            .collect::<Result<Vec<_>>>()?;

        self.apply(Template::ModalEnvironment, &EnvironmentView { modal_body })
    }

    fn apply<V: Serialize>(&self, template: Template, view: &V) -> Result<String> {
        let value = serde_json::to_value(view)?;
        self.renderer.render(template, &value)
    }
}

/// Build the detail-row view model shared by steps and hooks.
///
/// # Errors
///
/// Returns an error if a `text/html` embedding is not valid base64.
pub fn step_view(
    name: &str,
    result: &StepResult,
    rows: Option<&DataTable>,
    output: &[String],
    embeddings: &[Embedding],
) -> Result<StepView> {
    Ok(StepView {
        step_name: name.to_string(),
        step_duration: format_duration(result.duration),
        step_badge: status::badge_class(result).as_str(),
        step_result: status::status_label(result),
        step_datatable: rows.map(|table| DataTableBlock {
            datatable: table
                .rows
                .iter()
                .map(|cells| TableRow {
                    cells: cells.clone(),
                })
                .collect(),
        }),
        step_exception: result.error().map(|message| ExceptionBlock {
            exception: message.to_string(),
        }),
        step_output: (!output.is_empty()).then(|| OutputBlock {
            output: output.join("\n"),
        }),
        step_embeddings: embedding_blocks(embeddings)?,
    })
}

/// Convert embeddings to template blocks, in input order.
///
/// `text/html` payloads are decoded and inlined; `image/*` embeddings only
/// contribute their identifier. Other MIME types are skipped.
///
/// # Errors
///
/// Returns an error if a `text/html` payload is not valid base64.
pub fn embedding_blocks(embeddings: &[Embedding]) -> Result<Vec<EmbeddingBlock>> {
    let mut blocks = Vec::new();
    for embedding in embeddings {
        if embedding.is_html() {
            let bytes = STANDARD.decode(embedding.data.as_bytes()).map_err(|source| {
                crate::err!(EmbeddingDecode {
                    embedding_id: embedding.id.clone(),
                    mime_type: embedding.mime_type.clone(),
                    source: source,
                })
            })?;
            blocks.push(EmbeddingBlock::Text {
                text: String::from_utf8_lossy(&bytes).into_owned(),
            });
        } else if embedding.is_image() {
            blocks.push(EmbeddingBlock::Image {
                img_id: embedding.id.clone(),
            });
        } else {
            tracing::trace!(id = %embedding.id, mime_type = %embedding.mime_type, "Skipping embedding");
        }
    }
    Ok(blocks)
}

/// Render a duration as seconds with millisecond precision.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    format!("{:.3}s", duration.as_secs_f64())
}
