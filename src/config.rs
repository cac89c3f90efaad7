//! Experiment configuration loaders
//!
//! This module loads the two configuration documents consumed by the block
//! scheduler:
//! - Trigger definitions: named trigger identifiers mapped to integer codes
//! - Block parameters: per-block-kind numeric settings, with `edge_perc`
//!   fields as floating point and all other fields as integers
//!
//! Both loaders validate their required keys up front and tolerate extra
//! keys, so site-specific additions do not break loading.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::TimingError;

/// Trigger identifiers every experiment definition must provide
pub const REQUIRED_TRIGGERS: [&str; 10] = [
    "sound",
    "omission",
    "sync_start",
    "sync_stop",
    "iso_start",
    "iso_stop",
    "async_start",
    "async_stop",
    "baseline_start",
    "baseline_stop",
];

/// Block-parameter sections every configuration must provide
pub const REQUIRED_SECTIONS: [&str; 5] = [
    "block",
    "baseline",
    "synchronous",
    "isochronous",
    "asynchronous",
];

/// Validated mapping of named triggers to hardware trigger codes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerDef {
    codes: HashMap<String, i64>,
}

impl TriggerDef {
    /// Parse a trigger definition from a JSON document.
    ///
    /// The document is a flat object of trigger names to integer codes.
    /// All names in [`REQUIRED_TRIGGERS`] must be present; extra names are
    /// kept and retrievable through [`TriggerDef::code`].
    pub fn from_json(json: &str) -> Result<Self, TimingError> {
        let codes: HashMap<String, i64> = serde_json::from_str(json)?;
        for key in REQUIRED_TRIGGERS {
            if !codes.contains_key(key) {
                return Err(TimingError::MissingTrigger(key.to_string()));
            }
        }
        Ok(Self { codes })
    }

    /// Look up the code for a named trigger
    pub fn code(&self, name: &str) -> Option<i64> {
        self.codes.get(name).copied()
    }
}

/// Parameters for a stimulation block (synchronous, isochronous, asynchronous)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StimulationParams {
    /// Number of stimuli delivered in the block
    pub n_stimuli: i64,
    /// Number of stimuli replaced by omissions
    pub n_omissions: i64,
    /// Bottom/top trim percentage applied to interval distributions
    pub edge_perc: f64,
}

/// Validated experiment block parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Pause between blocks (seconds)
    pub inter_block: i64,
    /// Baseline block duration (seconds)
    pub baseline_duration: i64,
    pub synchronous: StimulationParams,
    pub isochronous: StimulationParams,
    pub asynchronous: StimulationParams,
}

impl ExperimentConfig {
    /// Parse block parameters from a JSON document.
    ///
    /// The document holds one object per section in [`REQUIRED_SECTIONS`].
    /// Every field except `edge_perc` must be an integer; `edge_perc` may
    /// be any JSON number and is read as floating point. Extra fields
    /// inside a section are ignored.
    pub fn from_json(json: &str) -> Result<Self, TimingError> {
        let root: Value = serde_json::from_str(json)?;

        for section in REQUIRED_SECTIONS {
            if !root.get(section).is_some_and(Value::is_object) {
                return Err(TimingError::MissingSection(section.to_string()));
            }
        }

        Ok(Self {
            inter_block: require_int(&root, "block", "inter_block")?,
            baseline_duration: require_int(&root, "baseline", "duration")?,
            synchronous: parse_stimulation(&root, "synchronous")?,
            isochronous: parse_stimulation(&root, "isochronous")?,
            asynchronous: parse_stimulation(&root, "asynchronous")?,
        })
    }
}

fn parse_stimulation(root: &Value, section: &str) -> Result<StimulationParams, TimingError> {
    Ok(StimulationParams {
        n_stimuli: require_int(root, section, "n_stimuli")?,
        n_omissions: require_int(root, section, "n_omissions")?,
        edge_perc: require_float(root, section, "edge_perc")?,
    })
}

fn require_field<'a>(root: &'a Value, section: &str, field: &str) -> Result<&'a Value, TimingError> {
    root.get(section)
        .and_then(|s| s.get(field))
        .ok_or_else(|| TimingError::MissingField(section.to_string(), field.to_string()))
}

fn require_int(root: &Value, section: &str, field: &str) -> Result<i64, TimingError> {
    let value = require_field(root, section, field)?;
    value.as_i64().ok_or_else(|| {
        TimingError::InvalidField(
            format!("{section}.{field}"),
            format!("expected an integer, got {value}"),
        )
    })
}

fn require_float(root: &Value, section: &str, field: &str) -> Result<f64, TimingError> {
    let value = require_field(root, section, field)?;
    value.as_f64().ok_or_else(|| {
        TimingError::InvalidField(
            format!("{section}.{field}"),
            format!("expected a number, got {value}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_triggers() -> &'static str {
        r#"{
            "sound": 1,
            "omission": 2,
            "sync_start": 10,
            "sync_stop": 11,
            "iso_start": 12,
            "iso_stop": 13,
            "async_start": 14,
            "async_stop": 15,
            "baseline_start": 16,
            "baseline_stop": 17
        }"#
    }

    fn sample_config() -> &'static str {
        r#"{
            "block": {"inter_block": 5},
            "baseline": {"duration": 300},
            "synchronous": {"n_stimuli": 120, "n_omissions": 20, "edge_perc": 10.0},
            "isochronous": {"n_stimuli": 120, "n_omissions": 20, "edge_perc": 10.0},
            "asynchronous": {"n_stimuli": 120, "n_omissions": 20, "edge_perc": 7.5}
        }"#
    }

    #[test]
    fn test_triggers_load() {
        let tdef = TriggerDef::from_json(sample_triggers()).unwrap();
        assert_eq!(tdef.code("sound"), Some(1));
        assert_eq!(tdef.code("baseline_stop"), Some(17));
        assert_eq!(tdef.code("unknown"), None);
    }

    #[test]
    fn test_triggers_missing_key() {
        let json = r#"{"sound": 1}"#;
        assert!(matches!(
            TriggerDef::from_json(json),
            Err(TimingError::MissingTrigger(_))
        ));
    }

    #[test]
    fn test_triggers_extra_keys_kept() {
        let mut doc: serde_json::Map<String, Value> =
            serde_json::from_str(sample_triggers()).unwrap();
        doc.insert("pause".to_string(), Value::from(99));
        let json = serde_json::to_string(&doc).unwrap();

        let tdef = TriggerDef::from_json(&json).unwrap();
        assert_eq!(tdef.code("pause"), Some(99));
    }

    #[test]
    fn test_config_load() {
        let config = ExperimentConfig::from_json(sample_config()).unwrap();
        assert_eq!(config.inter_block, 5);
        assert_eq!(config.baseline_duration, 300);
        assert_eq!(config.synchronous.n_stimuli, 120);
        assert_eq!(config.asynchronous.edge_perc, 7.5);
    }

    #[test]
    fn test_config_missing_section() {
        let json = r#"{"block": {"inter_block": 5}}"#;
        assert!(matches!(
            ExperimentConfig::from_json(json),
            Err(TimingError::MissingSection(_))
        ));
    }

    #[test]
    fn test_config_missing_field() {
        let json = sample_config().replace(r#""n_omissions": 20, "#, "");
        assert!(matches!(
            ExperimentConfig::from_json(&json),
            Err(TimingError::MissingField(_, _))
        ));
    }

    #[test]
    fn test_config_rejects_float_where_int_expected() {
        let json = sample_config().replace(r#""inter_block": 5"#, r#""inter_block": 5.5"#);
        assert!(matches!(
            ExperimentConfig::from_json(&json),
            Err(TimingError::InvalidField(_, _))
        ));
    }

    #[test]
    fn test_edge_perc_accepts_integer_literal() {
        let json = sample_config().replace(r#""edge_perc": 7.5"#, r#""edge_perc": 8"#);
        let config = ExperimentConfig::from_json(&json).unwrap();
        assert_eq!(config.asynchronous.edge_perc, 8.0);
    }

    #[test]
    fn test_config_extra_fields_ignored() {
        let json = sample_config().replace(
            r#""inter_block": 5"#,
            r#""inter_block": 5, "operator_note": 3"#,
        );
        assert!(ExperimentConfig::from_json(&json).is_ok());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            TriggerDef::from_json("not json"),
            Err(TimingError::JsonError(_))
        ));
        assert!(matches!(
            ExperimentConfig::from_json("not json"),
            Err(TimingError::JsonError(_))
        ));
    }
}
