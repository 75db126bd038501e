//! Random oversampling to balance class frequencies before fitting.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Duplicates minority-class examples (sampled with replacement) until every
/// class matches the majority count. Operates on indices so callers gather
/// feature rows however they store them.
pub struct RandomOverSampler {
    rng: StdRng,
}

impl RandomOverSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns the original indices followed by the sampled duplicates.
    pub fn resample(&mut self, labels: &[usize], n_classes: usize) -> Vec<usize> {
        let mut by_class: Vec<Vec<usize>> = vec![Vec::new(); n_classes];
        for (i, &label) in labels.iter().enumerate() {
            by_class[label].push(i);
        }
        let majority = by_class.iter().map(Vec::len).max().unwrap_or(0);

        let mut resampled: Vec<usize> = (0..labels.len()).collect();
        for class_indices in by_class.iter().filter(|c| !c.is_empty()) {
            for _ in class_indices.len()..majority {
                let pick = class_indices[self.rng.gen_range(0..class_indices.len())];
                resampled.push(pick);
            }
        }
        resampled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_counts(labels: &[usize], indices: &[usize], n_classes: usize) -> Vec<usize> {
        let mut counts = vec![0usize; n_classes];
        for &i in indices {
            counts[labels[i]] += 1;
        }
        counts
    }

    #[test]
    fn balances_all_classes_to_the_majority_count() {
        // 6 Left, 2 Center, 1 Right.
        let labels = vec![0, 0, 0, 0, 0, 0, 1, 1, 2];
        let resampled = RandomOverSampler::new(42).resample(&labels, 3);

        let counts = class_counts(&labels, &resampled, 3);
        assert_eq!(counts, vec![6, 6, 6]);
        // Originals are all retained.
        for i in 0..labels.len() {
            assert!(resampled.contains(&i));
        }
    }

    #[test]
    fn already_balanced_input_is_unchanged() {
        let labels = vec![0, 1, 2, 0, 1, 2];
        let resampled = RandomOverSampler::new(42).resample(&labels, 3);
        assert_eq!(resampled.len(), labels.len());
    }

    #[test]
    fn same_seed_gives_same_resample() {
        let labels = vec![0, 0, 0, 0, 1, 2, 2];
        let a = RandomOverSampler::new(7).resample(&labels, 3);
        let b = RandomOverSampler::new(7).resample(&labels, 3);
        assert_eq!(a, b);
    }

    #[test]
    fn absent_class_stays_absent() {
        let labels = vec![0, 0, 1];
        let resampled = RandomOverSampler::new(1).resample(&labels, 3);
        let counts = class_counts(&labels, &resampled, 3);
        assert_eq!(counts, vec![2, 2, 0]);
    }
}
