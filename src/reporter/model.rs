//! View models fed to the report templates.
//!
//! Field names are the template contract. Optional blocks are `Option`s that
//! are skipped when absent, so a template only ever sees the blocks that
//! exist and tests for them by presence.

use serde::Serialize;

/// Feature summary row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureView {
    pub data_target: String,
    pub feature_name: String,
    pub feature_badge: &'static str,
    pub feature_result: &'static str,
    /// Pre-rendered scenario rows
    pub feature_scenarios: Vec<String>,
}

/// Scenario summary row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioView {
    /// Identifier of the owning feature
    pub data_target: String,
    /// Identifier of the scenario's modal
    pub modal_target: String,
    pub scenario_name: String,
    pub scenario_badge: &'static str,
    pub scenario_result: &'static str,
}

/// Scenario detail panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalView {
    pub modal_target: String,
    pub modal_heading: String,
    /// `"<feature file> - line <n>"`
    pub modal_feature_line: String,
    /// Pre-rendered step and hook rows
    pub modal_body: Vec<String>,
}

/// Generic single-line row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalRowView {
    pub row_info: String,
}

/// Environment information panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentView {
    /// Pre-rendered info rows
    pub modal_body: Vec<String>,
}

/// Step or hook detail row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepView {
    pub step_name: String,
    pub step_duration: String,
    pub step_badge: &'static str,
    pub step_result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_datatable: Option<DataTableBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_exception: Option<ExceptionBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_output: Option<OutputBlock>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub step_embeddings: Vec<EmbeddingBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataTableBlock {
    pub datatable: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExceptionBlock {
    pub exception: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputBlock {
    pub output: String,
}

/// One embedded artifact; exactly one field is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EmbeddingBlock {
    /// Decoded `text/html` payload, inlined verbatim
    #[serde(rename = "step_embedding_text")]
    Text { text: String },
    /// Identifier of an image asset materialized by the caller
    #[serde(rename = "step_embedding_image")]
    Image { img_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_absent_blocks_are_not_serialized() {
        let view = StepView {
            step_name: "I click".to_string(),
            step_duration: "0.001s".to_string(),
            step_badge: "success",
            step_result: "Passed".to_string(),
            step_datatable: None,
            step_exception: None,
            step_output: None,
            step_embeddings: Vec::new(),
        };
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(
            value,
            json!({
                "step_name": "I click",
                "step_duration": "0.001s",
                "step_badge": "success",
                "step_result": "Passed",
            })
        );
    }

    #[test]
    fn test_field_order_is_declaration_order() {
        let view = ScenarioView {
            data_target: "feature-0".to_string(),
            modal_target: "scenario-0-0".to_string(),
            scenario_name: "Login".to_string(),
            scenario_badge: "success",
            scenario_result: "Passed",
        };
        let value = serde_json::to_value(&view).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                "data_target",
                "modal_target",
                "scenario_name",
                "scenario_badge",
                "scenario_result"
            ]
        );
    }

    #[test]
    fn test_embedding_blocks_are_externally_tagged() {
        let blocks = vec![
            EmbeddingBlock::Text {
                text: "<b>hi</b>".to_string(),
            },
            EmbeddingBlock::Image {
                img_id: "embedding-0-0-1".to_string(),
            },
        ];
        assert_eq!(
            serde_json::to_value(&blocks).unwrap(),
            json!([
                { "step_embedding_text": { "text": "<b>hi</b>" } },
                { "step_embedding_image": { "img_id": "embedding-0-0-1" } },
            ])
        );
    }
}
