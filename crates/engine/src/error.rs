//! Error types for training, evaluation and persistence.

use thiserror::Error;

/// Errors raised by the engine crate
#[derive(Error, Debug)]
pub enum EngineError {
    /// Nothing left to train on after filtering and splitting
    #[error("No training data: {0}")]
    EmptyTrainingSet(String),

    /// A configuration value is outside its accepted range
    #[error("Invalid configuration for {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    /// Filesystem failure while writing or reading the model directory
    #[error("Model I/O error at {path}: {source}")]
    ModelIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Model artifact could not be (de)serialized
    #[error("Model serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The filtering pipeline failed
    #[error("Filtering failed: {0}")]
    Pipeline(#[from] anyhow::Error),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, EngineError>;
