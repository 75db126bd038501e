//! Frozen multinomial-logistic classifier parameters.
//!
//! The training pipeline fits with linfa and extracts the fitted weights into
//! this struct, so the serving path scores with plain arithmetic and carries
//! no training-framework types.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// A fitted softmax classifier: one weight vector and intercept per class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftmaxClassifier {
    /// `weights[class][feature]`, all rows the same width.
    weights: Vec<Vec<f64>>,
    /// One intercept per class.
    intercept: Vec<f64>,
}

impl SoftmaxClassifier {
    pub fn new(weights: Vec<Vec<f64>>, intercept: Vec<f64>) -> Result<Self> {
        if weights.is_empty() {
            bail!("classifier has no classes");
        }
        if weights.len() != intercept.len() {
            bail!(
                "classifier has {} weight rows but {} intercepts",
                weights.len(),
                intercept.len()
            );
        }
        let width = weights[0].len();
        if width == 0 {
            bail!("classifier has zero-width weight rows");
        }
        if weights.iter().any(|row| row.len() != width) {
            bail!("classifier weight rows have inconsistent widths");
        }
        Ok(Self { weights, intercept })
    }

    pub fn n_classes(&self) -> usize {
        self.weights.len()
    }

    pub fn feature_count(&self) -> usize {
        self.weights[0].len()
    }

    /// Class probabilities for one schema-aligned feature row.
    pub fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>> {
        if row.len() != self.feature_count() {
            bail!(
                "feature length mismatch: got {}, expected {}",
                row.len(),
                self.feature_count()
            );
        }

        let mut logits: Vec<f64> = self
            .weights
            .iter()
            .zip(&self.intercept)
            .map(|(w, b)| b + w.iter().zip(row).map(|(wi, xi)| wi * xi).sum::<f64>())
            .collect();

        // Softmax, shifted by the max logit for numerical stability.
        let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        for z in logits.iter_mut() {
            *z = (*z - max).exp();
        }
        let sum: f64 = logits.iter().sum();
        for z in logits.iter_mut() {
            *z /= sum;
        }
        Ok(logits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Zero weights with `ln(p)` intercepts make the softmax return `p`
    /// exactly, which is how tests pin specific probability vectors.
    fn stub(probs: [f64; 3], feature_count: usize) -> SoftmaxClassifier {
        SoftmaxClassifier::new(
            vec![vec![0.0; feature_count]; 3],
            probs.iter().map(|p| p.ln()).collect(),
        )
        .unwrap()
    }

    #[test]
    fn stub_reproduces_fixed_probabilities() {
        let clf = stub([0.1, 0.7, 0.2], 4);
        let probs = clf.predict_proba(&[0.0; 4]).unwrap();
        assert!((probs[0] - 0.1).abs() < 1e-9);
        assert!((probs[1] - 0.7).abs() < 1e-9);
        assert!((probs[2] - 0.2).abs() < 1e-9);
    }

    #[test]
    fn probabilities_sum_to_one() {
        let clf = SoftmaxClassifier::new(
            vec![vec![0.5, -1.0], vec![0.0, 2.0], vec![-0.3, 0.1]],
            vec![0.1, -0.2, 0.0],
        )
        .unwrap();
        let probs = clf.predict_proba(&[1.0, 0.0]).unwrap();
        assert_eq!(probs.len(), 3);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(probs.iter().all(|p| *p > 0.0));
    }

    #[test]
    fn rejects_width_mismatch() {
        let clf = stub([0.2, 0.3, 0.5], 3);
        assert!(clf.predict_proba(&[1.0, 0.0]).is_err());
    }

    #[test]
    fn rejects_inconsistent_construction() {
        assert!(SoftmaxClassifier::new(vec![], vec![]).is_err());
        assert!(SoftmaxClassifier::new(vec![vec![1.0]], vec![0.0, 0.0]).is_err());
        assert!(SoftmaxClassifier::new(vec![vec![1.0], vec![1.0, 2.0]], vec![0.0, 0.0]).is_err());
    }
}
