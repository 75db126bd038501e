//! Classification metrics for the held-out test split.

use crate::types::prediction::DiveZone;
use std::fmt;

/// Precision/recall/F1 for one dive zone.
#[derive(Debug, Clone, Copy)]
pub struct ClassMetrics {
    pub zone: DiveZone,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Full evaluation of predictions against ground truth.
#[derive(Debug, Clone)]
pub struct ClassificationReport {
    pub accuracy: f64,
    /// `confusion[truth][predicted]`, classes in `DiveZone` index order.
    pub confusion: [[usize; 3]; 3],
    pub per_class: [ClassMetrics; 3],
    pub macro_f1: f64,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Build a report from parallel truth/prediction class-index slices.
pub fn evaluate(truth: &[usize], predicted: &[usize]) -> ClassificationReport {
    debug_assert_eq!(truth.len(), predicted.len());

    let mut confusion = [[0usize; 3]; 3];
    for (&t, &p) in truth.iter().zip(predicted) {
        confusion[t][p] += 1;
    }

    let correct: usize = (0..3).map(|c| confusion[c][c]).sum();
    let accuracy = ratio(correct, truth.len());

    let per_class = DiveZone::ALL.map(|zone| {
        let c = zone.class_index();
        let tp = confusion[c][c];
        let predicted_c: usize = (0..3).map(|t| confusion[t][c]).sum();
        let support: usize = confusion[c].iter().sum();
        let precision = ratio(tp, predicted_c);
        let recall = ratio(tp, support);
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };
        ClassMetrics {
            zone,
            precision,
            recall,
            f1,
            support,
        }
    });

    let macro_f1 = per_class.iter().map(|m| m.f1).sum::<f64>() / 3.0;

    ClassificationReport {
        accuracy,
        confusion,
        per_class,
        macro_f1,
    }
}

/// Macro-F1 only, used as the grid-search score.
pub fn macro_f1(truth: &[usize], predicted: &[usize]) -> f64 {
    evaluate(truth, predicted).macro_f1
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "accuracy: {:.3}", self.accuracy)?;
        writeln!(f, "confusion matrix (rows = truth, cols = predicted):")?;
        for (c, row) in self.confusion.iter().enumerate() {
            writeln!(
                f,
                "  {:>6}  {:>4} {:>4} {:>4}",
                DiveZone::ALL[c].label(),
                row[0],
                row[1],
                row[2]
            )?;
        }
        writeln!(f, "{:>8} {:>10} {:>10} {:>10} {:>10}", "", "precision", "recall", "f1", "support")?;
        for m in &self.per_class {
            writeln!(
                f,
                "{:>8} {:>10.3} {:>10.3} {:>10.3} {:>10}",
                m.zone.label(),
                m.precision,
                m.recall,
                m.f1,
                m.support
            )?;
        }
        write!(f, "macro f1: {:.3}", self.macro_f1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_predictions_score_one() {
        let truth = vec![0, 1, 2, 0, 1, 2];
        let report = evaluate(&truth, &truth);
        assert_eq!(report.accuracy, 1.0);
        assert_eq!(report.macro_f1, 1.0);
        assert_eq!(report.confusion[0][0], 2);
        assert_eq!(report.confusion[0][1], 0);
    }

    #[test]
    fn confusion_matrix_counts_misclassifications() {
        let truth = vec![0, 0, 1, 2];
        let predicted = vec![0, 1, 1, 1];
        let report = evaluate(&truth, &predicted);

        assert_eq!(report.confusion[0][1], 1);
        assert_eq!(report.confusion[2][1], 1);
        assert_eq!(report.accuracy, 0.5);

        let left = report.per_class[0];
        assert_eq!(left.support, 2);
        assert_eq!(left.precision, 1.0);
        assert_eq!(left.recall, 0.5);
    }

    #[test]
    fn absent_class_contributes_zero_f1() {
        // No Right examples and none predicted.
        let truth = vec![0, 1, 0, 1];
        let predicted = vec![0, 1, 1, 1];
        let report = evaluate(&truth, &predicted);
        assert_eq!(report.per_class[2].f1, 0.0);
        assert!(report.macro_f1 < 1.0);
    }
}
