//! Error types for the AQI core library
use thiserror::Error;

/// Main error type for feature building, encoding and classification.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AqiError {
    /// A category name that is not part of the label table
    #[error("configuration error: unknown AQI category label '{0}'")]
    UnknownCategoryLabel(String),

    /// Location name not known to the location encoder
    #[error("unknown location: {0}")]
    UnknownLocation(String),

    /// Location code outside the location encoder's range
    #[error("unknown location code: {0}")]
    UnknownLocationCode(usize),

    /// Model emitted a class index the label encoder cannot decode
    #[error("configuration error: class index {index} out of range for {classes} labels")]
    UnknownClassIndex { index: usize, classes: usize },

    /// Encoder class list contains the same name twice
    #[error("configuration error: duplicate encoder class '{0}'")]
    DuplicateClass(String),

    /// An input reading outside its accepted range
    #[error("invalid reading for {field}: {value}")]
    InvalidReading { field: &'static str, value: f64 },

    /// Feature vector length does not match what a model or scaler expects
    #[error("feature length mismatch: got {got}, expected {expected}")]
    FeatureCountMismatch { expected: usize, got: usize },

    /// Full-history rolling mode needs exactly `needed` daily values
    #[error("full history mode needs exactly {needed} daily PM2.5 values, found {found}")]
    MissingHistory { needed: usize, found: usize },

    /// The classifier failed to produce a prediction
    #[error("prediction failed: {0}")]
    Prediction(String),
}

impl AqiError {
    /// True for defects in the model's label set or encoders, as opposed to
    /// bad user input.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            AqiError::UnknownCategoryLabel(_)
                | AqiError::UnknownClassIndex { .. }
                | AqiError::DuplicateClass(_)
        )
    }
}

/// Type alias for Results using AqiError
pub type Result<T> = std::result::Result<T, AqiError>;
