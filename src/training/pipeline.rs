//! Offline training pipeline: load → clean → encode → split → oversample →
//! grid-search → cross-validate → evaluate → persist.

use crate::config::TrainingConfig;
use crate::features::{FeatureEncoder, FeatureSchema};
use crate::models::classifier::SoftmaxClassifier;
use crate::models::loader;
use crate::training::dataset::{self, CleanRecord};
use crate::training::evaluation::{self, ClassificationReport};
use crate::training::sampler::RandomOverSampler;
use anyhow::{Context, Result};
use linfa::prelude::*;
use linfa_logistic::MultiLogisticRegression;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;

const N_CLASSES: usize = 3;

/// What a training run produced, beyond the persisted artifacts.
#[derive(Debug)]
pub struct TrainingSummary {
    pub best_alpha: f64,
    pub best_max_iterations: u64,
    pub best_cv_macro_f1: f64,
    pub cv_accuracy_mean: f64,
    pub cv_accuracy_std: f64,
    pub train_rows: usize,
    pub test_rows: usize,
    pub report: ClassificationReport,
}

/// Run the full pipeline and persist the two artifacts.
pub fn run(config: &TrainingConfig, model_path: &str, schema_path: &str) -> Result<TrainingSummary> {
    let records = dataset::load_dataset(&config.dataset_path)?;
    let schema = FeatureSchema::canonical();
    let (features, labels) = encode_matrix(&records, &schema);

    for class in 0..N_CLASSES {
        if !labels.contains(&class) {
            anyhow::bail!("dataset has no examples of every dive zone; missing class {class}");
        }
    }

    // Held-out split first; the test side keeps its natural distribution.
    let (train_idx, test_idx) = stratified_split(&labels, config.test_fraction, config.seed);
    let train_labels: Vec<usize> = train_idx.iter().map(|&i| labels[i]).collect();

    // Balance only the training split.
    let resampled = RandomOverSampler::new(config.seed).resample(&train_labels, N_CLASSES);
    let resampled_idx: Vec<usize> = resampled.iter().map(|&i| train_idx[i]).collect();
    let (train_x, train_y) = gather(&features, &labels, &resampled_idx);
    info!(
        natural = train_idx.len(),
        resampled = resampled_idx.len(),
        test = test_idx.len(),
        "Split and oversampled"
    );

    // Grid search by k-fold macro-F1 on the resampled training split.
    let folds = stratified_kfold(&train_y, config.cv_folds, config.seed);
    let mut best: Option<(f64, u64, f64)> = None;
    for &alpha in &config.alphas {
        for &max_iter in &config.max_iterations {
            let fold_scores =
                cross_validate(&train_x, &train_y, &folds, alpha, max_iter, evaluation::macro_f1)?;
            let score = fold_scores.iter().sum::<f64>() / fold_scores.len() as f64;
            info!(alpha, max_iter, macro_f1 = score, "Grid-search candidate");
            if best.map_or(true, |(_, _, s)| score > s) {
                best = Some((alpha, max_iter, score));
            }
        }
    }
    let (best_alpha, best_max_iterations, best_cv_macro_f1) =
        best.context("hyperparameter grid was empty")?;
    info!(
        alpha = best_alpha,
        max_iter = best_max_iterations,
        macro_f1 = best_cv_macro_f1,
        "Best configuration"
    );

    // Cross-validated accuracy of the winning configuration.
    let fold_accuracies = cross_validate(
        &train_x,
        &train_y,
        &folds,
        best_alpha,
        best_max_iterations,
        |t, p| evaluation::evaluate(t, p).accuracy,
    )?;
    let cv_accuracy_mean = fold_accuracies.iter().sum::<f64>() / fold_accuracies.len() as f64;
    let cv_accuracy_std = (fold_accuracies
        .iter()
        .map(|a| (a - cv_accuracy_mean).powi(2))
        .sum::<f64>()
        / fold_accuracies.len() as f64)
        .sqrt();
    info!(
        mean = cv_accuracy_mean,
        std = cv_accuracy_std,
        "Cross-validated accuracy"
    );

    // Refit on the full resampled training split.
    let classifier = fit_softmax(train_x, train_y, best_alpha, best_max_iterations)?;

    // Evaluate on the untouched test split.
    let (test_x, test_y) = gather(&features, &labels, &test_idx);
    let predicted = predict_classes(&classifier, &test_x)?;
    let report = evaluation::evaluate(&test_y, &predicted);
    info!(accuracy = report.accuracy, macro_f1 = report.macro_f1, "Test-set evaluation");
    info!("\n{report}");

    loader::save_artifacts(&classifier, &schema, model_path, schema_path)?;

    Ok(TrainingSummary {
        best_alpha,
        best_max_iterations,
        best_cv_macro_f1,
        cv_accuracy_mean,
        cv_accuracy_std,
        train_rows: resampled_idx.len(),
        test_rows: test_idx.len(),
        report,
    })
}

/// Encode cleaned records against the schema; labels are dive-zone class
/// indices.
pub fn encode_matrix(records: &[CleanRecord], schema: &FeatureSchema) -> (Array2<f64>, Vec<usize>) {
    let encoder = FeatureEncoder::new();
    let mut features = Array2::zeros((records.len(), schema.len()));
    let mut labels = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        let row = encoder.encode_parts(
            &record.team,
            record.foot_right,
            record.zone,
            record.penalty_number,
            record.elimination,
            record.on_target,
            record.goal,
        );
        let aligned = schema.align(&row);
        for (j, value) in aligned.into_iter().enumerate() {
            features[[i, j]] = value;
        }
        labels.push(record.keeper_zone.class_index());
    }
    (features, labels)
}

/// Shuffled per-class split; each class contributes `test_fraction` of its
/// examples (at least one, when it has more than one) to the test side.
pub fn stratified_split(labels: &[usize], test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();

    for class in 0..N_CLASSES {
        let mut indices: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, &l)| l == class)
            .map(|(i, _)| i)
            .collect();
        indices.shuffle(&mut rng);

        let n_test = if indices.len() < 2 {
            0
        } else {
            ((indices.len() as f64 * test_fraction).round() as usize).clamp(1, indices.len() - 1)
        };
        test.extend_from_slice(&indices[..n_test]);
        train.extend_from_slice(&indices[n_test..]);
    }
    (train, test)
}

/// Round-robin per-class fold assignment, so every fold (and its complement)
/// sees all classes.
fn stratified_kfold(labels: &[usize], k: usize, seed: u64) -> Vec<Vec<usize>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut folds: Vec<Vec<usize>> = vec![Vec::new(); k];
    for class in 0..N_CLASSES {
        let mut indices: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, &l)| l == class)
            .map(|(i, _)| i)
            .collect();
        indices.shuffle(&mut rng);
        for (slot, index) in indices.into_iter().enumerate() {
            folds[slot % k].push(index);
        }
    }
    folds
}

fn gather(features: &Array2<f64>, labels: &[usize], idx: &[usize]) -> (Array2<f64>, Vec<usize>) {
    let mut x = Array2::zeros((idx.len(), features.ncols()));
    for (row, &i) in idx.iter().enumerate() {
        x.row_mut(row).assign(&features.row(i));
    }
    let y = idx.iter().map(|&i| labels[i]).collect();
    (x, y)
}

/// Fit multinomial logistic regression and freeze the parameters into a
/// [`SoftmaxClassifier`]. The fitted columns follow ascending label order,
/// which matches the dive-zone class indices.
fn fit_softmax(x: Array2<f64>, y: Vec<usize>, alpha: f64, max_iter: u64) -> Result<SoftmaxClassifier> {
    let dataset = Dataset::new(x, Array1::from(y));
    let fitted = MultiLogisticRegression::default()
        .alpha(alpha)
        .max_iterations(max_iter)
        .fit(&dataset)
        .context("logistic regression fit failed")?;

    let params = fitted.params();
    let intercept = fitted.intercept();
    let (n_features, n_classes) = params.dim();
    let weights: Vec<Vec<f64>> = (0..n_classes)
        .map(|c| (0..n_features).map(|f| params[[f, c]]).collect())
        .collect();
    SoftmaxClassifier::new(weights, intercept.to_vec())
}

fn predict_classes(classifier: &SoftmaxClassifier, x: &Array2<f64>) -> Result<Vec<usize>> {
    let mut predicted = Vec::with_capacity(x.nrows());
    for row in x.rows() {
        let probs = classifier.predict_proba(&row.to_vec())?;
        let argmax = probs
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap_or(0);
        predicted.push(argmax);
    }
    Ok(predicted)
}

/// One score per held-out fold.
fn cross_validate<S>(
    x: &Array2<f64>,
    y: &[usize],
    folds: &[Vec<usize>],
    alpha: f64,
    max_iter: u64,
    score: S,
) -> Result<Vec<f64>>
where
    S: Fn(&[usize], &[usize]) -> f64,
{
    let mut scores = Vec::with_capacity(folds.len());
    for held_out in 0..folds.len() {
        let train_idx: Vec<usize> = folds
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != held_out)
            .flat_map(|(_, fold)| fold.iter().copied())
            .collect();
        let (fit_x, fit_y) = gather(x, y, &train_idx);
        let classifier = fit_softmax(fit_x, fit_y, alpha, max_iter)?;

        let (valid_x, valid_y) = gather(x, y, &folds[held_out]);
        let predicted = predict_classes(&classifier, &valid_x)?;
        scores.push(score(&valid_y, &predicted));
    }
    Ok(scores)
}
