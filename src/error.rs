//! Error types for cardiostim

use thiserror::Error;

/// Errors that can occur during timing synthesis or configuration loading
#[derive(Debug, Error)]
pub enum TimingError {
    #[error("Argument 'perc' should represent a percentage between 0 and 50. Provided '{0}' is not valid.")]
    InvalidPercentage(f64),

    #[error("Insufficient events for computation: {0}")]
    InsufficientEvents(String),

    #[error("Sequence timings must be finite and strictly increasing: {0}")]
    NonMonotonicSequence(String),

    #[error("No inter-stimulus intervals survive trimming: {0}")]
    EmptyDistribution(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Key '{0}' is missing from trigger definition")]
    MissingTrigger(String),

    #[error("Section '{0}' is missing from configuration")]
    MissingSection(String),

    #[error("Field '{1}' is missing from section '{0}'")]
    MissingField(String, String),

    #[error("Invalid value for field '{0}': {1}")]
    InvalidField(String, String),
}
