//! Cucumber JSON report parser.
//!
//! Deserializes the standard Cucumber JSON format and assigns every feature,
//! scenario and embedding a deterministic, attribute-safe identifier:
//! `feature-<n>`, `scenario-<n>-<m>` and `embedding-<n>-<m>-<k>`. Numbering is
//! global across all parsed files, in input order.

use crate::error::{Result, ResultExt};
use crate::parser::REPORT_EXTENSION;
use crate::types::{DataTable, Embedding, Feature, Hook, Scenario, Step, StepResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use walkdir::WalkDir;

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(default)]
    uri: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    elements: Vec<RawElement>,
}

#[derive(Debug, Deserialize)]
struct RawElement {
    #[serde(default)]
    name: String,
    #[serde(default)]
    keyword: String,
    #[serde(default)]
    line: u32,
    #[serde(default)]
    before: Vec<RawHook>,
    #[serde(default)]
    steps: Vec<RawStep>,
    #[serde(default)]
    after: Vec<RawHook>,
}

#[derive(Debug, Deserialize)]
struct RawStep {
    #[serde(default)]
    name: String,
    #[serde(default)]
    keyword: String,
    #[serde(default)]
    result: RawResult,
    #[serde(default)]
    rows: Option<Vec<RawRow>>,
    #[serde(default)]
    output: Vec<String>,
    #[serde(default)]
    embeddings: Vec<RawEmbedding>,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    cells: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawHook {
    #[serde(default, rename = "match")]
    matched: Option<RawMatch>,
    #[serde(default)]
    result: RawResult,
    #[serde(default)]
    output: Vec<String>,
    #[serde(default)]
    embeddings: Vec<RawEmbedding>,
}

#[derive(Debug, Deserialize)]
struct RawMatch {
    #[serde(default)]
    location: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    #[serde(default = "default_status")]
    status: String,
    /// Nanoseconds
    #[serde(default)]
    duration: u64,
    #[serde(default)]
    error_message: Option<String>,
}

impl Default for RawResult {
    fn default() -> Self {
        Self {
            status: default_status(),
            duration: 0,
            error_message: None,
        }
    }
}

fn default_status() -> String {
    "undefined".to_string()
}

#[derive(Debug, Deserialize)]
struct RawEmbedding {
    #[serde(default)]
    mime_type: Option<String>,
    // Newer formatters nest the type under `media`
    #[serde(default)]
    media: Option<RawMedia>,
    #[serde(default)]
    data: String,
}

#[derive(Debug, Deserialize)]
struct RawMedia {
    #[serde(rename = "type")]
    kind: String,
}

/// Parser for Cucumber JSON report files.
#[derive(Debug, Default, Clone, Copy)]
pub struct CucumberParser;

impl CucumberParser {
    /// Create a parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse a single JSON document. Identifiers start at `feature-0`.
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is not a Cucumber JSON array.
    pub fn parse_str(&self, content: &str) -> Result<Vec<Feature>> {
        let raw = parse_raw(content, "<string>")?;
        Ok(convert(raw))
    }

    /// Parse report files and directories.
    ///
    /// Directories are walked recursively for `*.json` files in file name
    /// order. Features keep the order of `paths` and of the files found.
    ///
    /// # Errors
    ///
    /// Returns an error if a path does not exist, cannot be read, or holds
    /// invalid JSON.
    pub fn parse_paths<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<Feature>> {
        let mut raw = Vec::new();
        for file in report_files(paths)? {
            tracing::debug!(path = %file.display(), "Parsing Cucumber report");
            let content = std::fs::read_to_string(&file).with_path(&file)?;
            raw.extend(parse_raw(&content, &file.display().to_string())?);
        }

        let features = convert(raw);
        tracing::info!(features = features.len(), "Parsed Cucumber reports");
        Ok(features)
    }
}

fn report_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        let path = path.as_ref();
        if !path.exists() {
            return Err(crate::err!(FileNotFound {
                path: path.to_path_buf(),
            }));
        }
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }

        for entry in WalkDir::new(path).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read directory entry");
                    continue;
                }
            };
            let file_path = entry.path();
            if file_path.is_file()
                && file_path.extension().and_then(|e| e.to_str()) == Some(REPORT_EXTENSION)
            {
                files.push(file_path.to_path_buf());
            }
        }
    }
    Ok(files)
}

fn parse_raw(content: &str, input: &str) -> Result<Vec<RawFeature>> {
    // Some runners write an empty file when nothing ran
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(content).map_err(|e| {
        crate::err!(InputParse {
            input: input.to_string(),
            message: e.to_string(),
        })
    })
}

fn convert(raw: Vec<RawFeature>) -> Vec<Feature> {
    raw.into_iter()
        .enumerate()
        .map(|(f, feature)| {
            let scenarios = feature
                .elements
                .into_iter()
                .enumerate()
                .map(|(s, element)| convert_scenario(element, &feature.uri, f, s))
                .collect();
            Feature {
                id: format!("feature-{f}"),
                name: feature.name,
                uri: feature.uri,
                scenarios,
            }
        })
        .collect()
}

fn convert_scenario(element: RawElement, feature_uri: &str, f: usize, s: usize) -> Scenario {
    let mut embedding_ids = (0..).map(|k| format!("embedding-{f}-{s}-{k}"));

    let before = convert_hooks(element.before, &mut embedding_ids);
    let steps = element
        .steps
        .into_iter()
        .map(|step| Step {
            name: step.name,
            keyword: step.keyword,
            result: convert_result(step.result),
            rows: step.rows.map(|rows| DataTable {
                rows: rows.into_iter().map(|r| r.cells).collect(),
            }),
            output: step.output,
            embeddings: convert_embeddings(step.embeddings, &mut embedding_ids),
        })
        .collect();
    let after = convert_hooks(element.after, &mut embedding_ids);

    Scenario {
        id: format!("scenario-{f}-{s}"),
        name: element.name,
        keyword: element.keyword,
        line: element.line,
        feature_uri: feature_uri.to_string(),
        before,
        steps,
        after,
    }
}

fn convert_hooks(raw: Vec<RawHook>, ids: &mut dyn Iterator<Item = String>) -> Vec<Hook> {
    raw.into_iter()
        .map(|hook| Hook {
            location: hook
                .matched
                .and_then(|m| m.location)
                .unwrap_or_default(),
            result: convert_result(hook.result),
            output: hook.output,
            embeddings: convert_embeddings(hook.embeddings, ids),
        })
        .collect()
}

fn convert_result(raw: RawResult) -> StepResult {
    StepResult {
        status: raw.status,
        duration: Duration::from_nanos(raw.duration),
        error_message: raw.error_message,
    }
}

fn convert_embeddings(raw: Vec<RawEmbedding>, ids: &mut dyn Iterator<Item = String>) -> Vec<Embedding> {
    raw.into_iter()
        .zip(ids)
        .map(|(embedding, id)| Embedding {
            id,
            mime_type: embedding
                .mime_type
                .or_else(|| embedding.media.map(|m| m.kind))
                .unwrap_or_default(),
            data: embedding.data,
        })
        .collect()
}
