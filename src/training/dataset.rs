//! Historical shootout dataset ingestion and cleaning.

use crate::types::prediction::DiveZone;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// One raw CSV row. Every cell is optional; incomplete rows are dropped
/// during cleaning, mirroring how the model was originally trained.
#[derive(Debug, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Game_id")]
    pub game_id: Option<String>,
    #[serde(rename = "Team")]
    pub team: Option<String>,
    #[serde(rename = "Zone")]
    pub zone: Option<f64>,
    #[serde(rename = "Foot")]
    pub foot: Option<String>,
    #[serde(rename = "Keeper")]
    pub keeper: Option<String>,
    #[serde(rename = "OnTarget")]
    pub on_target: Option<f64>,
    #[serde(rename = "Goal")]
    pub goal: Option<f64>,
    #[serde(rename = "Penalty_Number")]
    pub penalty_number: Option<f64>,
    #[serde(rename = "Elimination")]
    pub elimination: Option<f64>,
}

/// A cleaned training example with integer-cast fields and the keeper's dive
/// mapped to its class label.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRecord {
    pub team: String,
    pub foot_right: u8,
    pub zone: u8,
    pub penalty_number: u8,
    pub on_target: u8,
    pub goal: u8,
    pub elimination: u8,
    pub keeper_zone: DiveZone,
}

impl RawRecord {
    /// Fails (to `None`) when an essential cell is missing or a coded value
    /// is outside its known set.
    fn clean(&self) -> Option<CleanRecord> {
        let team = self.team.as_deref()?.trim().to_string();
        let foot_right = match self.foot.as_deref()?.trim() {
            "L" => 0,
            "R" => 1,
            _ => return None,
        };
        let keeper_zone = DiveZone::from_keeper_code(&self.keeper.as_deref()?.trim().to_uppercase())?;
        let zone = self.zone? as u8;
        let penalty_number = self.penalty_number? as u8;
        let on_target = self.on_target? as u8;
        let goal = self.goal? as u8;
        let elimination = self.elimination? as u8;

        if !(1..=9).contains(&zone) || !(1..=12).contains(&penalty_number) {
            return None;
        }

        Some(CleanRecord {
            team,
            foot_right,
            zone,
            penalty_number,
            on_target,
            goal,
            elimination,
            keeper_zone,
        })
    }
}

/// Read the shootout CSV, dropping rows with missing essential columns or
/// unknown coded values, and log how many were dropped.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<CleanRecord>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .from_path(path)
        .with_context(|| format!("failed to open dataset at {}", path.display()))?;

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for (line, raw) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = raw.with_context(|| format!("failed to parse CSV row {}", line + 2))?;
        match raw.clean() {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!(dropped, "Dropped incomplete shootout rows");
    }
    info!(rows = records.len(), dataset = %path.display(), "Loaded shootout dataset");

    if records.is_empty() {
        anyhow::bail!("dataset at {} contains no usable rows", path.display());
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Game_id,Team,Zone,Foot,Keeper,OnTarget,Goal,Penalty_Number,Elimination";

    fn write_csv(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file
    }

    #[test]
    fn loads_and_cleans_rows() {
        let file = write_csv(&[
            "1,FRA,3,L,C,1,1,1,0",
            "1,GER,7,R,l,1,0,2,1",
            // Missing Keeper cell: dropped.
            "1,ITA,5,R,,1,1,3,0",
            // Unknown foot code: dropped.
            "1,ENG,5,X,R,1,1,4,0",
        ]);

        let records = load_dataset(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].team, "FRA");
        assert_eq!(records[0].keeper_zone, DiveZone::Center);
        assert_eq!(records[0].foot_right, 0);
        // Lowercase keeper codes are uppercased before mapping.
        assert_eq!(records[1].keeper_zone, DiveZone::Left);
        assert_eq!(records[1].goal, 0);
    }

    #[test]
    fn numeric_cells_are_cast_from_floats() {
        let file = write_csv(&["10,BRA,9.0,R,R,1.0,1.0,12.0,1.0"]);
        let records = load_dataset(file.path()).unwrap();
        assert_eq!(records[0].zone, 9);
        assert_eq!(records[0].penalty_number, 12);
        assert_eq!(records[0].elimination, 1);
    }

    #[test]
    fn empty_dataset_is_an_error() {
        let file = write_csv(&["1,ITA,5,R,,1,1,3,0"]);
        assert!(load_dataset(file.path()).is_err());
    }
}
