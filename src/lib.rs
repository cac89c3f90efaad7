//! Cardiostim - Stimulus-timing engine for cardio-audio sleep experiments
//!
//! Cardiostim turns the recorded R-peak timings of a synchronous
//! (cardiac-locked) stimulation block into the stimulus schedule of an
//! asynchronous block: interval estimation → percentile trimming →
//! seeded resampling → cumulative reconstruction.
//!
//! ## Modules
//!
//! - **timings**: Asynchronous timing synthesis (the core)
//! - **stats**: Percentile and interval statistics
//! - **config**: Trigger-definition and block-parameter loaders
//! - **types**: Provenance-carrying schedule records

pub mod config;
pub mod error;
pub mod stats;
pub mod timings;
pub mod types;

pub use config::{ExperimentConfig, TriggerDef};
pub use error::TimingError;
pub use timings::{generate_async_timings, AsyncTimingGenerator, DEFAULT_EDGE_PERC};
pub use types::{BlockKind, ScheduleRecord};

/// Cardiostim version embedded in all schedule records
pub const CARDIOSTIM_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for schedule records
pub const PRODUCER_NAME: &str = "cardiostim";
