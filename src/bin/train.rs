//! Offline trainer: fits the dive-zone classifier from historical shootout
//! data and writes the two artifacts the service loads at startup.
//!
//! Usage: `train [config-path]` (defaults to `config/config.toml`).

use anyhow::Result;
use keeper_dive_predictor::training::pipeline;
use keeper_dive_predictor::AppConfig;
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("keeper_dive_predictor=info".parse()?),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };

    info!(dataset = %config.training.dataset_path, "Starting training run");
    let summary = pipeline::run(
        &config.training,
        &config.artifacts.model_path,
        &config.artifacts.schema_path,
    )?;

    info!(
        alpha = summary.best_alpha,
        max_iterations = summary.best_max_iterations,
        cv_macro_f1 = summary.best_cv_macro_f1,
        cv_accuracy = format!("{:.3} ± {:.3}", summary.cv_accuracy_mean, summary.cv_accuracy_std),
        test_accuracy = summary.report.accuracy,
        "Training complete"
    );

    Ok(())
}
