//! Penalty shot input types and field-level validation.

use serde::Deserialize;
use thiserror::Error;

/// Fixed roster of team codes seen in the historical shootout data.
///
/// Teams outside this list have no `Team_*` column in the trained model and
/// are rejected at validation rather than silently encoded as all-zeros.
pub const TEAMS: [&str; 31] = [
    "ARG", "BEL", "BRA", "BUL", "CHI", "COL", "CRA", "CRO", "DEN", "ENG", "FRA", "GER", "GHA",
    "GRE", "HOL", "IRE", "ITA", "JAP", "KOR", "MEX", "PAR", "POR", "ROM", "RUM", "RUS", "SPA",
    "SWE", "SWZ", "UKR", "URU", "YUG",
];

/// Inclusive range of goal target zones.
pub const ZONE_MIN: i64 = 1;
pub const ZONE_MAX: i64 = 9;

/// Inclusive range of penalty sequence numbers within a shootout.
pub const PENALTY_NUMBER_MIN: i64 = 1;
pub const PENALTY_NUMBER_MAX: i64 = 12;

/// Validation failure for a single request field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Team must be one of {TEAMS:?}, got {0:?}")]
    UnknownTeam(String),

    #[error("Foot must be either \"L\" or \"R\", got {0:?}")]
    InvalidFoot(String),

    #[error("Zone must be between {ZONE_MIN} and {ZONE_MAX}, got {0}")]
    ZoneOutOfRange(i64),

    #[error("Penalty_Number must be between {PENALTY_NUMBER_MIN} and {PENALTY_NUMBER_MAX}, got {0}")]
    PenaltyNumberOutOfRange(i64),

    #[error("Elimination must be 0 or 1, got {0}")]
    InvalidElimination(i64),
}

/// Kicking foot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Foot {
    Left,
    Right,
}

impl Foot {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "L" => Some(Foot::Left),
            "R" => Some(Foot::Right),
            _ => None,
        }
    }

    /// Encoded value used by the model (L=0, R=1).
    pub fn as_indicator(self) -> u8 {
        match self {
            Foot::Left => 0,
            Foot::Right => 1,
        }
    }
}

/// Raw wire shape of `POST /predict`.
///
/// Integer fields are received wide so out-of-range values reach the
/// validator instead of failing JSON decoding with an opaque message.
#[derive(Debug, Clone, Deserialize)]
pub struct PenaltyRequest {
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Foot")]
    pub foot: String,
    #[serde(rename = "Zone")]
    pub zone: i64,
    #[serde(rename = "Penalty_Number")]
    pub penalty_number: i64,
    #[serde(rename = "Elimination")]
    pub elimination: i64,
}

impl PenaltyRequest {
    /// Validate every field eagerly; the first offending field is reported
    /// with its allowed set or range.
    pub fn validate(self) -> Result<PenaltyInput, ValidationError> {
        if !TEAMS.contains(&self.team.as_str()) {
            return Err(ValidationError::UnknownTeam(self.team));
        }
        let foot =
            Foot::parse(&self.foot).ok_or_else(|| ValidationError::InvalidFoot(self.foot.clone()))?;
        if !(ZONE_MIN..=ZONE_MAX).contains(&self.zone) {
            return Err(ValidationError::ZoneOutOfRange(self.zone));
        }
        if !(PENALTY_NUMBER_MIN..=PENALTY_NUMBER_MAX).contains(&self.penalty_number) {
            return Err(ValidationError::PenaltyNumberOutOfRange(self.penalty_number));
        }
        if self.elimination != 0 && self.elimination != 1 {
            return Err(ValidationError::InvalidElimination(self.elimination));
        }

        Ok(PenaltyInput {
            team: self.team,
            foot,
            zone: self.zone as u8,
            penalty_number: self.penalty_number as u8,
            elimination: self.elimination as u8,
        })
    }
}

/// A validated, immutable penalty shot record.
///
/// Only constructible through [`PenaltyRequest::validate`], so every field is
/// in range by the time feature encoding sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PenaltyInput {
    team: String,
    foot: Foot,
    zone: u8,
    penalty_number: u8,
    elimination: u8,
}

impl PenaltyInput {
    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn foot(&self) -> Foot {
        self.foot
    }

    pub fn zone(&self) -> u8 {
        self.zone
    }

    pub fn penalty_number(&self) -> u8 {
        self.penalty_number
    }

    pub fn elimination(&self) -> u8 {
        self.elimination
    }
}
