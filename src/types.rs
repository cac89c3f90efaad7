//! Schedule records
//!
//! This module defines the provenance-carrying envelope around a generated
//! stimulus schedule. The block scheduler persists one record per generated
//! block so a session can be reconstructed offline from its seeds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CARDIOSTIM_VERSION, PRODUCER_NAME};

/// Block kinds sequenced by the experiment controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Baseline,
    Synchronous,
    Isochronous,
    Asynchronous,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Baseline => "baseline",
            BlockKind::Synchronous => "synchronous",
            BlockKind::Isochronous => "isochronous",
            BlockKind::Asynchronous => "asynchronous",
        }
    }
}

/// Record of a generated stimulus schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRecord {
    /// Unique record identifier
    pub id: Uuid,
    /// Producing engine name
    pub producer: String,
    /// Producing engine version
    pub producer_version: String,
    /// Block kind this schedule was generated for
    pub block: BlockKind,
    /// Seed of the random source that produced the draws
    pub seed: u64,
    /// Trim percentage applied to the interval distribution
    pub edge_perc: f64,
    /// When the schedule was generated
    pub generated_at: DateTime<Utc>,
    /// Stimulus onset times (seconds), anchored at 0
    pub timings: Vec<f64>,
}

impl ScheduleRecord {
    /// Wrap a generated asynchronous schedule with its provenance
    pub fn asynchronous(seed: u64, edge_perc: f64, timings: Vec<f64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            producer: PRODUCER_NAME.to_string(),
            producer_version: CARDIOSTIM_VERSION.to_string(),
            block: BlockKind::Asynchronous,
            seed,
            edge_perc,
            generated_at: Utc::now(),
            timings,
        }
    }

    /// Serialize the record to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Load a record from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_round_trip() {
        let record = ScheduleRecord::asynchronous(42, 10.0, vec![0.0, 0.9, 1.8]);
        let json = record.to_json().unwrap();
        let loaded = ScheduleRecord::from_json(&json).unwrap();

        assert_eq!(loaded.id, record.id);
        assert_eq!(loaded.block, BlockKind::Asynchronous);
        assert_eq!(loaded.seed, 42);
        assert_eq!(loaded.timings, record.timings);
    }

    #[test]
    fn test_record_provenance() {
        let record = ScheduleRecord::asynchronous(7, 5.0, vec![0.0, 1.0]);
        assert_eq!(record.producer, PRODUCER_NAME);
        assert_eq!(record.producer_version, CARDIOSTIM_VERSION);
    }

    #[test]
    fn test_block_kind_serialization() {
        let json = serde_json::to_string(&BlockKind::Asynchronous).unwrap();
        assert_eq!(json, r#""asynchronous""#);
        assert_eq!(BlockKind::Isochronous.as_str(), "isochronous");
    }
}
