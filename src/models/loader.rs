//! Artifact persistence: the fitted classifier and its feature schema.
//!
//! Both artifacts are JSON files written by the training pipeline and read
//! once at service startup.

use crate::features::FeatureSchema;
use crate::models::classifier::SoftmaxClassifier;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// Load both artifacts from disk.
///
/// Either file missing or unparsable is an error; the caller decides whether
/// that degrades the service or aborts the process.
pub fn load_artifacts(
    model_path: impl AsRef<Path>,
    schema_path: impl AsRef<Path>,
) -> Result<(SoftmaxClassifier, FeatureSchema)> {
    let model_path = model_path.as_ref();
    let schema_path = schema_path.as_ref();

    let model_json = fs::read_to_string(model_path)
        .with_context(|| format!("failed to read model artifact at {}", model_path.display()))?;
    let classifier: SoftmaxClassifier = serde_json::from_str(&model_json)
        .with_context(|| format!("failed to parse model artifact at {}", model_path.display()))?;

    let schema_json = fs::read_to_string(schema_path)
        .with_context(|| format!("failed to read feature schema at {}", schema_path.display()))?;
    let schema: FeatureSchema = serde_json::from_str(&schema_json)
        .with_context(|| format!("failed to parse feature schema at {}", schema_path.display()))?;

    info!(
        model = %model_path.display(),
        schema = %schema_path.display(),
        features = schema.len(),
        classes = classifier.n_classes(),
        "Artifacts loaded"
    );

    Ok((classifier, schema))
}

/// Persist both artifacts, creating parent directories as needed.
pub fn save_artifacts(
    classifier: &SoftmaxClassifier,
    schema: &FeatureSchema,
    model_path: impl AsRef<Path>,
    schema_path: impl AsRef<Path>,
) -> Result<()> {
    let model_path = model_path.as_ref();
    let schema_path = schema_path.as_ref();

    for path in [model_path, schema_path] {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create artifact directory {}", parent.display())
                })?;
            }
        }
    }

    let model_json = serde_json::to_string(classifier).context("failed to serialize model")?;
    fs::write(model_path, model_json)
        .with_context(|| format!("failed to write model artifact to {}", model_path.display()))?;

    let schema_json = serde_json::to_string(schema).context("failed to serialize feature schema")?;
    fs::write(schema_path, schema_json)
        .with_context(|| format!("failed to write feature schema to {}", schema_path.display()))?;

    info!(
        model = %model_path.display(),
        schema = %schema_path.display(),
        "Artifacts saved"
    );

    Ok(())
}
