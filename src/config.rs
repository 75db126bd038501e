//! Configuration management for the prediction service and trainer

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub artifacts: ArtifactConfig,
    pub training: TrainingConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

/// Persisted artifact locations shared by the trainer (writer) and the
/// service (reader)
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactConfig {
    /// Serialized fitted classifier
    pub model_path: String,
    /// Serialized ordered feature-name list
    pub schema_path: String,
}

/// Training pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TrainingConfig {
    /// CSV of historical shootout records
    pub dataset_path: String,
    /// Held-out fraction per class for the test split
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f64,
    /// Seed for splitting, shuffling, and oversampling
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Folds for grid-search cross-validation
    #[serde(default = "default_cv_folds")]
    pub cv_folds: usize,
    /// L2 regularization strengths to grid-search
    #[serde(default = "default_alphas")]
    pub alphas: Vec<f64>,
    /// Iteration budgets to grid-search
    #[serde(default = "default_max_iterations")]
    pub max_iterations: Vec<u64>,
}

fn default_test_fraction() -> f64 {
    0.2
}

fn default_seed() -> u64 {
    42
}

fn default_cv_folds() -> usize {
    3
}

fn default_alphas() -> Vec<f64> {
    vec![0.01, 0.1, 1.0]
}

fn default_max_iterations() -> Vec<u64> {
    vec![100, 500]
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl AppConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        let config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.training.test_fraction) || self.training.test_fraction == 0.0
        {
            anyhow::bail!(
                "training.test_fraction must be in (0, 1), got {}",
                self.training.test_fraction
            );
        }
        if self.training.cv_folds < 2 {
            anyhow::bail!("training.cv_folds must be at least 2, got {}", self.training.cv_folds);
        }
        if self.training.alphas.is_empty() || self.training.max_iterations.is_empty() {
            anyhow::bail!("training grid must not be empty");
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            artifacts: ArtifactConfig {
                model_path: "artifacts/keeper_dive_model.json".to_string(),
                schema_path: "artifacts/feature_names.json".to_string(),
            },
            training: TrainingConfig {
                dataset_path: "data/WorldCupShootouts.csv".to_string(),
                test_fraction: default_test_fraction(),
                seed: default_seed(),
                cv_folds: default_cv_folds(),
                alphas: default_alphas(),
                max_iterations: default_max_iterations(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.training.test_fraction, 0.2);
        assert_eq!(config.training.seed, 42);
        assert!(config.artifacts.model_path.ends_with(".json"));
    }

    #[test]
    fn test_load_from_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[server]
host = "127.0.0.1"
port = 9999

[artifacts]
model_path = "m.json"
schema_path = "s.json"

[training]
dataset_path = "shots.csv"
test_fraction = 0.25
seed = 7

[logging]
level = "debug"
"#
        )
        .unwrap();

        let config = AppConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.training.test_fraction, 0.25);
        assert_eq!(config.training.seed, 7);
        // Grid fields fall back to defaults when omitted.
        assert_eq!(config.training.cv_folds, 3);
        assert!(!config.training.alphas.is_empty());
    }

    #[test]
    fn test_rejects_bad_test_fraction() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[server]
host = "127.0.0.1"
port = 9999

[artifacts]
model_path = "m.json"
schema_path = "s.json"

[training]
dataset_path = "shots.csv"
test_fraction = 1.5

[logging]
level = "info"
"#
        )
        .unwrap();

        assert!(AppConfig::load_from_path(file.path()).is_err());
    }
}
