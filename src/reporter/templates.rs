//! Template engine boundary.
//!
//! The report builder only knows the six named templates and the
//! [`TemplateRenderer`] trait. [`HandlebarsRenderer`] is the shipped
//! implementation; any engine with variable substitution, list iteration
//! and "absent field renders nothing" semantics can stand in for it.

use crate::error::{ReportError, Result, ResultExt};
use crate::reporter::html_escape;
use handlebars::Handlebars;
use serde_json::Value;
use std::fmt::Display;
use std::path::Path;

/// Extension of template override files.
pub const TEMPLATE_EXTENSION: &str = "hbs";

/// The structural units of the report, one template each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    /// Summary table row for a feature
    Feature,
    /// Summary table row for a scenario (nested in a feature row)
    Scenario,
    /// Detail panel for one scenario
    Modal,
    /// Generic single-line info row
    ModalRow,
    /// Step or hook detail row
    ModalStep,
    /// Environment information panel
    ModalEnvironment,
}

impl Template {
    /// Every template, in registration order.
    pub const ALL: [Self; 6] = [
        Self::Feature,
        Self::Scenario,
        Self::Modal,
        Self::ModalRow,
        Self::ModalStep,
        Self::ModalEnvironment,
    ];

    /// Registration name; also the file stem of an override file.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Scenario => "scenario",
            Self::Modal => "modal",
            Self::ModalRow => "modal_row",
            Self::ModalStep => "modal_step",
            Self::ModalEnvironment => "modal_environment",
        }
    }

    /// Look a template up by its registration name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// The markup shipped with the crate.
    #[must_use]
    pub const fn default_source(self) -> &'static str {
        match self {
            Self::Feature => FEATURE_TEMPLATE,
            Self::Scenario => SCENARIO_TEMPLATE,
            Self::Modal => MODAL_TEMPLATE,
            Self::ModalRow => MODAL_ROW_TEMPLATE,
            Self::ModalStep => MODAL_STEP_TEMPLATE,
            Self::ModalEnvironment => MODAL_ENVIRONMENT_TEMPLATE,
        }
    }
}

impl Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Applies a view model to a named template.
pub trait TemplateRenderer {
    /// Render `template` with `view`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is unknown or rendering fails.
    fn render(&self, template: Template, view: &Value) -> Result<String>;
}

/// Handlebars-backed renderer with the built-in templates pre-registered.
#[derive(Debug)]
pub struct HandlebarsRenderer {
    handlebars: Handlebars<'static>,
}

impl HandlebarsRenderer {
    /// Create a renderer with the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to compile.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        // Absent optional blocks must render as nothing
        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(html_escape);

        let mut renderer = Self { handlebars };
        for template in Template::ALL {
            renderer.register(template, template.default_source())?;
        }
        Ok(renderer)
    }

    /// Create a renderer and apply overrides from `dir`.
    ///
    /// Each `<name>.hbs` whose stem matches a template name replaces the
    /// built-in markup; other files are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read or an override
    /// fails to compile.
    pub fn with_templates_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut renderer = Self::new()?;

        let mut entries = std::fs::read_dir(dir)
            .with_path(dir)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .with_path(dir)?;
        entries.sort_by_key(std::fs::DirEntry::path);

        for entry in entries {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match Template::from_name(stem) {
                Some(template) => {
                    let source = std::fs::read_to_string(&path).with_path(&path)?;
                    renderer.register(template, &source)?;
                    tracing::debug!(template = %template, path = %path.display(), "Template override loaded");
                }
                None => {
                    tracing::warn!(path = %path.display(), "Ignoring template file with unknown name");
                }
            }
        }

        Ok(renderer)
    }

    /// Register (or replace) the markup of one template.
    ///
    /// # Errors
    ///
    /// Returns an error if the markup does not compile.
    pub fn register(&mut self, template: Template, source: &str) -> Result<()> {
        self.handlebars
            .register_template_string(template.name(), source)
            .map_err(|e| {
                crate::err!(TemplateRegister {
                    template: template.name().to_string(),
                    message: e.to_string(),
                })
            })
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(&self, template: Template, view: &Value) -> Result<String> {
        self.handlebars
            .render(template.name(), view)
            .map_err(|e| ReportError::TemplateRender {
                template: template.name().to_string(),
                message: e.to_string(),
                source: Some(Box::new(e)),
                src_path: file!(),
                src_line: line!(),
            })
    }
}

const FEATURE_TEMPLATE: &str = r##"<tr class="feature-row" data-toggle="collapse" data-target="#{{data_target}}">
  <td class="feature-name">{{feature_name}}</td>
  <td><span class="badge badge-{{feature_badge}}">{{feature_result}}</span></td>
</tr>
<tr class="feature-scenarios collapse" id="{{data_target}}">
  <td colspan="2">
    <table class="scenario-table">
      <tbody>
{{#each feature_scenarios}}{{{this}}}{{/each}}
      </tbody>
    </table>
  </td>
</tr>
"##;

const SCENARIO_TEMPLATE: &str = r##"<tr class="scenario-row" data-parent="#{{data_target}}" data-modal="#{{modal_target}}">
  <td class="scenario-name"><a href="#{{modal_target}}" class="modal-link">{{scenario_name}}</a></td>
  <td><span class="badge badge-{{scenario_badge}}">{{scenario_result}}</span></td>
</tr>
"##;

const MODAL_TEMPLATE: &str = r#"<div class="modal" id="{{modal_target}}" role="dialog" aria-hidden="true">
  <div class="modal-dialog">
    <div class="modal-header">
      <h4 class="modal-title">{{modal_heading}}</h4>
      <span class="modal-subtitle">{{modal_feature_line}}</span>
      <button type="button" class="modal-close" aria-label="Close">&times;</button>
    </div>
    <div class="modal-body">
{{#each modal_body}}{{{this}}}{{/each}}
    </div>
  </div>
</div>
"#;

const MODAL_ROW_TEMPLATE: &str = r#"<div class="modal-row">{{row_info}}</div>
"#;

const MODAL_STEP_TEMPLATE: &str = r#"<div class="step">
  <div class="step-header">
    <span class="step-name">{{step_name}}</span>
    <span class="step-duration">{{step_duration}}</span>
    <span class="badge badge-{{step_badge}}">{{step_result}}</span>
  </div>
{{#with step_datatable}}  <table class="step-datatable">
{{#each datatable}}    <tr>{{#each cells}}<td>{{this}}</td>{{/each}}</tr>
{{/each}}  </table>
{{/with}}{{#with step_exception}}  <pre class="step-exception">{{exception}}</pre>
{{/with}}{{#with step_output}}  <pre class="step-output">{{output}}</pre>
{{/with}}{{#each step_embeddings}}{{#with step_embedding_text}}  <div class="step-embedding-text">{{{text}}}</div>
{{/with}}{{#with step_embedding_image}}  <img class="step-embedding-image" src="images/{{img_id}}.png" alt="{{img_id}}">
{{/with}}{{/each}}</div>
"#;

const MODAL_ENVIRONMENT_TEMPLATE: &str = r#"<div class="modal" id="environment-info" role="dialog" aria-hidden="true">
  <div class="modal-dialog">
    <div class="modal-header">
      <h4 class="modal-title">Environment Information</h4>
      <button type="button" class="modal-close" aria-label="Close">&times;</button>
    </div>
    <div class="modal-body">
{{#each modal_body}}{{{this}}}{{/each}}
    </div>
  </div>
</div>
"#;
