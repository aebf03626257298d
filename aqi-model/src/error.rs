//! Error types for loading model artifacts
use aqi_core::AqiError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while reading or validating a model directory.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Artifact file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Artifact is not valid JSON for its schema
    #[error("failed to parse {artifact}: {source}")]
    Json {
        artifact: String,
        #[source]
        source: serde_json::Error,
    },

    /// Artifact parsed but is structurally unusable
    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error(transparent)]
    Domain(#[from] AqiError),
}

/// Type alias for Results using ModelError
pub type Result<T> = std::result::Result<T, ModelError>;
