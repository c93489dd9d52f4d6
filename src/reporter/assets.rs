//! Image asset materialization.
//!
//! The builder only passes image identifiers through to the templates.
//! This writes the decoded payloads to `<dir>/<id>.png` so those
//! identifiers resolve when the page is opened.

use crate::error::{Result, ResultExt};
use crate::types::{Embedding, Feature};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::path::{Path, PathBuf};

/// Decode every image embedding in `features` and write it under `dir`.
///
/// Returns the written paths in tree order.
///
/// # Errors
///
/// Returns an error if a payload is not valid base64 or a file cannot be
/// written.
pub fn write_image_assets(features: &[Feature], dir: &Path) -> Result<Vec<PathBuf>> {
    let images: Vec<&Embedding> = features
        .iter()
        .flat_map(|f| &f.scenarios)
        .filter(|s| !s.is_background())
        .flat_map(|s| {
            let before = s.before.iter().flat_map(|h| &h.embeddings);
            let steps = s.steps.iter().flat_map(|st| &st.embeddings);
            let after = s.after.iter().flat_map(|h| &h.embeddings);
            before.chain(steps).chain(after)
        })
        .filter(|e| e.is_image())
        .collect();

    if images.is_empty() {
        return Ok(Vec::new());
    }

    // Decode everything before touching the filesystem
    let decoded = images
        .into_iter()
        .map(|embedding| {
            STANDARD
                .decode(embedding.data.as_bytes())
                .map(|bytes| (embedding, bytes))
                .map_err(|source| {
                    crate::err!(EmbeddingDecode {
                        embedding_id: embedding.id.clone(),
                        mime_type: embedding.mime_type.clone(),
                        source: source,
                    })
                })
        })
        .collect::<Result<Vec<_>>>()?;

    std::fs::create_dir_all(dir).with_path(dir)?;

    let mut written = Vec::with_capacity(decoded.len());
    for (embedding, bytes) in decoded {
        let path = dir.join(format!("{}.png", embedding.id));
        std::fs::write(&path, bytes).with_path(&path)?;
        written.push(path);
    }

    tracing::info!(count = written.len(), dir = %dir.display(), "Image assets written");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Hook, Scenario, Step, StepResult};
    use std::time::Duration;

    fn image(id: &str, data: &str) -> Embedding {
        Embedding {
            id: id.to_string(),
            mime_type: "image/png".to_string(),
            data: data.to_string(),
        }
    }

    #[test]
    fn test_writes_step_and_hook_images() {
        let dir = tempfile::tempdir().unwrap();
        let mut scenario = Scenario::new("scenario-0-0", "Shot", 3, "a.feature");
        let mut step = Step::new("I take a screenshot", StepResult::new("passed", Duration::ZERO));
        step.embeddings.push(image("embedding-0-0-0", "aGVsbG8="));
        step.embeddings.push(Embedding {
            id: "embedding-0-0-1".to_string(),
            mime_type: "text/html".to_string(),
            data: "PGI+aGk8L2I+".to_string(),
        });
        scenario.steps.push(step);
        let mut hook = Hook::new("Hooks.after()", StepResult::new("passed", Duration::ZERO));
        hook.embeddings.push(image("embedding-0-0-2", "d29ybGQ="));
        scenario.after.push(hook);

        let features = vec![Feature {
            id: "feature-0".to_string(),
            name: "A".to_string(),
            uri: "a.feature".to_string(),
            scenarios: vec![scenario],
        }];

        let images_dir = dir.path().join("images");
        let written = write_image_assets(&features, &images_dir).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(
            std::fs::read(images_dir.join("embedding-0-0-0.png")).unwrap(),
            b"hello"
        );
        assert_eq!(
            std::fs::read(images_dir.join("embedding-0-0-2.png")).unwrap(),
            b"world"
        );
    }

    #[test]
    fn test_invalid_image_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut scenario = Scenario::new("scenario-0-0", "Shot", 3, "a.feature");
        let mut step = Step::new("I take a screenshot", StepResult::new("passed", Duration::ZERO));
        step.embeddings.push(image("embedding-0-0-0", "aGVsbG8="));
        step.embeddings.push(image("embedding-0-0-1", "%%%"));
        scenario.steps.push(step);
        let features = vec![Feature {
            id: "feature-0".to_string(),
            name: "A".to_string(),
            uri: "a.feature".to_string(),
            scenarios: vec![scenario],
        }];

        let images_dir = dir.path().join("images");
        let err = write_image_assets(&features, &images_dir).unwrap_err();
        assert!(matches!(err, crate::error::ReportError::EmbeddingDecode { .. }));
        assert!(!images_dir.exists());
    }

    #[test]
    fn test_no_images_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let images_dir = dir.path().join("images");
        let written = write_image_assets(&[], &images_dir).unwrap();
        assert!(written.is_empty());
        assert!(!images_dir.exists());
    }
}
