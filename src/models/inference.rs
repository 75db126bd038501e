//! Inference engine for dive-zone prediction.

use crate::config::AppConfig;
use crate::features::{FeatureEncoder, FeatureSchema};
use crate::models::classifier::SoftmaxClassifier;
use crate::models::loader;
use crate::types::penalty::PenaltyInput;
use crate::types::prediction::{DiveZone, Prediction};
use anyhow::{bail, Result};
use tracing::debug;

/// Owns the loaded classifier and schema; read-only after construction and
/// shared across all requests.
pub struct InferenceEngine {
    classifier: SoftmaxClassifier,
    schema: FeatureSchema,
    encoder: FeatureEncoder,
}

impl InferenceEngine {
    /// Build an engine, checking that the classifier and schema agree on
    /// width and that the classifier covers the three dive zones.
    pub fn new(classifier: SoftmaxClassifier, schema: FeatureSchema) -> Result<Self> {
        if classifier.feature_count() != schema.len() {
            bail!(
                "classifier expects {} features but schema has {}",
                classifier.feature_count(),
                schema.len()
            );
        }
        if classifier.n_classes() != DiveZone::ALL.len() {
            bail!(
                "classifier has {} classes, expected {}",
                classifier.n_classes(),
                DiveZone::ALL.len()
            );
        }
        Ok(Self {
            classifier,
            schema,
            encoder: FeatureEncoder::new(),
        })
    }

    /// Load both artifacts from the configured paths and build the engine.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let (classifier, schema) =
            loader::load_artifacts(&config.artifacts.model_path, &config.artifacts.schema_path)?;
        Self::new(classifier, schema)
    }

    pub fn feature_count(&self) -> usize {
        self.schema.len()
    }

    /// Encode, align against the schema, score, and keep the top two zones.
    pub fn predict(&self, input: &PenaltyInput) -> Result<Prediction> {
        let row = self.encoder.encode_aligned(input, &self.schema);
        let probs = self.classifier.predict_proba(&row)?;
        // n_classes == 3 is checked at construction.
        let probs: [f64; 3] = [probs[0], probs[1], probs[2]];

        debug!(
            team = input.team(),
            zone = input.zone(),
            penalty_number = input.penalty_number(),
            left = probs[0],
            center = probs[1],
            right = probs[2],
            "Scored penalty input"
        );

        Ok(Prediction::top_two(&probs))
    }
}
