//! Feature encoding for dive-zone model inference and training.
//!
//! The encoder produces the same one-hot layout the training pipeline uses,
//! and every row is aligned against the persisted feature schema before it
//! reaches the classifier: schema columns absent from the row are zero-filled,
//! row entries unknown to the schema are dropped, and the final order is the
//! schema's order exactly.

use crate::types::penalty::{PenaltyInput, TEAMS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ordered list of feature names frozen at training time.
///
/// Persisted alongside the model and treated as read-only for the process
/// lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    /// The canonical training-time layout, driven by fixed enumerations
    /// rather than whatever order a dataset happens to produce:
    /// `Foot`, `OnTarget`, `Goal`, `Elimination`, `Zone_1..9`, `PN_1..12`,
    /// then `Team_*` over the roster.
    pub fn canonical() -> Self {
        let mut names = Vec::with_capacity(4 + 9 + 12 + TEAMS.len());
        names.push("Foot".to_string());
        names.push("OnTarget".to_string());
        names.push("Goal".to_string());
        names.push("Elimination".to_string());
        for zone in 1..=9 {
            names.push(format!("Zone_{zone}"));
        }
        for pn in 1..=12 {
            names.push(format!("PN_{pn}"));
        }
        for team in TEAMS {
            names.push(format!("Team_{team}"));
        }
        FeatureSchema { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Reindex a row against this schema: missing columns become 0.0, extra
    /// columns are dropped, output order is schema order.
    pub fn align(&self, row: &FeatureRow) -> Vec<f64> {
        self.names
            .iter()
            .map(|name| row.get(name).unwrap_or(0.0))
            .collect()
    }
}

/// A flat name → value mapping for a single shot, before schema alignment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRow {
    values: HashMap<String, f64>,
}

impl FeatureRow {
    fn set(&mut self, name: String, value: f64) {
        self.values.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Deterministic one-hot encoder shared by inference and training.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureEncoder;

impl FeatureEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encode a validated request for inference.
    ///
    /// OnTarget and Goal are fixed to 1 here: the training data assumes the
    /// scored shot was on target and part of a goal attempt, and the request
    /// carries no actual outcome to check against. Predictions for shots
    /// that miss the frame inherit that bias.
    pub fn encode(&self, input: &PenaltyInput) -> FeatureRow {
        self.encode_parts(
            input.team(),
            input.foot().as_indicator(),
            input.zone(),
            input.penalty_number(),
            input.elimination(),
            1,
            1,
        )
    }

    /// Encode raw field values; the training pipeline calls this with the
    /// dataset's real OnTarget/Goal outcomes.
    #[allow(clippy::too_many_arguments)]
    pub fn encode_parts(
        &self,
        team: &str,
        foot_right: u8,
        zone: u8,
        penalty_number: u8,
        elimination: u8,
        on_target: u8,
        goal: u8,
    ) -> FeatureRow {
        let mut row = FeatureRow::default();
        row.set("Foot".to_string(), f64::from(foot_right));
        row.set("OnTarget".to_string(), f64::from(on_target));
        row.set("Goal".to_string(), f64::from(goal));
        row.set("Elimination".to_string(), f64::from(elimination));
        for z in 1..=9u8 {
            row.set(format!("Zone_{z}"), f64::from(u8::from(z == zone)));
        }
        for pn in 1..=12u8 {
            row.set(format!("PN_{pn}"), f64::from(u8::from(pn == penalty_number)));
        }
        for t in TEAMS {
            row.set(format!("Team_{t}"), f64::from(u8::from(t == team)));
        }
        row
    }

    /// Encode and align in one step, yielding a vector the classifier can
    /// consume directly.
    pub fn encode_aligned(&self, input: &PenaltyInput, schema: &FeatureSchema) -> Vec<f64> {
        schema.align(&self.encode(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::penalty::PenaltyRequest;

    fn sample_input() -> PenaltyInput {
        PenaltyRequest {
            team: "FRA".to_string(),
            foot: "L".to_string(),
            zone: 3,
            penalty_number: 1,
            elimination: 0,
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn canonical_schema_has_56_columns() {
        let schema = FeatureSchema::canonical();
        assert_eq!(schema.len(), 56);
        assert_eq!(schema.names()[0], "Foot");
        assert!(schema.names().contains(&"Zone_9".to_string()));
        assert!(schema.names().contains(&"PN_12".to_string()));
        assert!(schema.names().contains(&"Team_YUG".to_string()));
    }

    #[test]
    fn aligned_row_matches_schema_exactly() {
        let schema = FeatureSchema::canonical();
        let aligned = FeatureEncoder::new().encode_aligned(&sample_input(), &schema);
        assert_eq!(aligned.len(), schema.len());
    }

    #[test]
    fn one_hot_positions_are_correct() {
        let encoder = FeatureEncoder::new();
        let row = encoder.encode(&sample_input());

        assert_eq!(row.get("Foot"), Some(0.0));
        assert_eq!(row.get("OnTarget"), Some(1.0));
        assert_eq!(row.get("Goal"), Some(1.0));
        assert_eq!(row.get("Elimination"), Some(0.0));
        assert_eq!(row.get("Zone_3"), Some(1.0));
        assert_eq!(row.get("Zone_4"), Some(0.0));
        assert_eq!(row.get("PN_1"), Some(1.0));
        assert_eq!(row.get("PN_2"), Some(0.0));
        assert_eq!(row.get("Team_FRA"), Some(1.0));
        assert_eq!(row.get("Team_GER"), Some(0.0));
    }

    #[test]
    fn encoding_is_idempotent() {
        let encoder = FeatureEncoder::new();
        let input = sample_input();
        let schema = FeatureSchema::canonical();
        assert_eq!(
            encoder.encode_aligned(&input, &schema),
            encoder.encode_aligned(&input, &schema)
        );
    }

    #[test]
    fn alignment_zero_fills_missing_and_drops_extras() {
        // Schema with a column the encoder never produces, and without most
        // of the columns it does produce.
        let schema: FeatureSchema =
            serde_json::from_str(r#"["Foot", "Synthetic_Column", "Team_FRA"]"#).unwrap();
        let aligned = FeatureEncoder::new().encode_aligned(&sample_input(), &schema);
        assert_eq!(aligned, vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn training_parts_carry_real_outcomes() {
        let row = FeatureEncoder::new().encode_parts("GER", 1, 7, 4, 1, 0, 0);
        assert_eq!(row.get("OnTarget"), Some(0.0));
        assert_eq!(row.get("Goal"), Some(0.0));
        assert_eq!(row.get("Foot"), Some(1.0));
        assert_eq!(row.get("Zone_7"), Some(1.0));
        assert_eq!(row.get("PN_4"), Some(1.0));
        assert_eq!(row.get("Team_GER"), Some(1.0));
    }

    #[test]
    fn schema_round_trips_through_json() {
        let schema = FeatureSchema::canonical();
        let json = serde_json::to_string(&schema).unwrap();
        let back: FeatureSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(schema, back);
    }
}
