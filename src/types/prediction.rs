//! Prediction output types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The three coarse regions a goalkeeper dives toward — the prediction target.
///
/// Class indices match the training label mapping (L=0, C=1, R=2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiveZone {
    Left,
    Center,
    Right,
}

impl DiveZone {
    pub const ALL: [DiveZone; 3] = [DiveZone::Left, DiveZone::Center, DiveZone::Right];

    pub fn from_class_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn class_index(self) -> usize {
        match self {
            DiveZone::Left => 0,
            DiveZone::Center => 1,
            DiveZone::Right => 2,
        }
    }

    /// Keeper column code from the raw shootout data ("L"/"C"/"R").
    pub fn from_keeper_code(code: &str) -> Option<Self> {
        match code {
            "L" => Some(DiveZone::Left),
            "C" => Some(DiveZone::Center),
            "R" => Some(DiveZone::Right),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DiveZone::Left => "Left",
            DiveZone::Center => "Center",
            DiveZone::Right => "Right",
        }
    }
}

/// Top-2 ranked prediction, the body of a successful `/predict` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// The two most likely dive zones, highest probability first.
    pub dive_zones: Vec<String>,
    /// Probabilities for exactly those two zones.
    pub probabilities: BTreeMap<String, f64>,
}

impl Prediction {
    /// Rank a per-class probability vector (indexed by [`DiveZone`] class
    /// index) and keep the top two.
    ///
    /// Exact ties keep the lower class index first (stable sort); callers
    /// should not rely on that order.
    pub fn top_two(probs: &[f64; 3]) -> Self {
        let mut ranked: Vec<(DiveZone, f64)> = DiveZone::ALL
            .iter()
            .map(|&zone| (zone, probs[zone.class_index()]))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(2);

        Prediction {
            dive_zones: ranked.iter().map(|(zone, _)| zone.label().to_string()).collect(),
            probabilities: ranked
                .into_iter()
                .map(|(zone, p)| (zone.label().to_string(), p))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_top_two_by_descending_probability() {
        let prediction = Prediction::top_two(&[0.1, 0.7, 0.2]);
        assert_eq!(prediction.dive_zones, vec!["Center", "Right"]);
        assert_eq!(prediction.probabilities.len(), 2);
        assert!((prediction.probabilities["Center"] - 0.7).abs() < 1e-12);
        assert!((prediction.probabilities["Right"] - 0.2).abs() < 1e-12);
        assert!(!prediction.probabilities.contains_key("Left"));
    }

    #[test]
    fn exact_tie_keeps_lower_class_index_first() {
        let prediction = Prediction::top_two(&[0.4, 0.4, 0.2]);
        assert_eq!(prediction.dive_zones, vec!["Left", "Center"]);
    }

    #[test]
    fn keeper_codes_round_trip_to_class_indices() {
        assert_eq!(DiveZone::from_keeper_code("L"), Some(DiveZone::Left));
        assert_eq!(DiveZone::from_keeper_code("C"), Some(DiveZone::Center));
        assert_eq!(DiveZone::from_keeper_code("R"), Some(DiveZone::Right));
        assert_eq!(DiveZone::from_keeper_code("X"), None);
        for (i, zone) in DiveZone::ALL.iter().enumerate() {
            assert_eq!(zone.class_index(), i);
            assert_eq!(DiveZone::from_class_index(i), Some(*zone));
        }
    }
}
