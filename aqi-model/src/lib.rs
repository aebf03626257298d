//! Trained AQI classifier artifacts.
//!
//! A model directory holds four JSON files:
//!
//! - `model.json` - random forest ([`forest::RandomForest`])
//! - `city_encoder.json` - location names in code order
//! - `aqi_encoder.json` - category names in class-index order
//! - `feature_scaler.json` - optional [`scaler::StandardScaler`]
//!
//! [`ModelContext`] bundles them into a single read-only [`aqi_core::Classify`]
//! implementation.
//!
//! # Usage
//!
//! ```rust
//! use aqi_model::ModelContext;
//!
//! let ctx = ModelContext::demo().unwrap();
//! assert!(ctx.locations().encode("Lahore").is_ok());
//! ```

pub mod context;
pub mod error;
pub mod forest;
pub mod scaler;

pub use context::ModelContext;
pub use error::ModelError;

use std::fmt::Debug;

pub const MODEL_FILE: &str = "model.json";
pub const LOCATION_ENCODER_FILE: &str = "city_encoder.json";
pub const LABEL_ENCODER_FILE: &str = "aqi_encoder.json";
pub const SCALER_FILE: &str = "feature_scaler.json";

/// A trained classifier over fixed-width feature rows.
pub trait Model: Debug + Send + Sync {
    /// Class index for one row.
    fn predict(&self, features: &[f64]) -> aqi_core::Result<usize>;

    fn n_features(&self) -> usize;

    fn n_classes(&self) -> usize;

    fn feature_importances(&self) -> Option<&[f64]> {
        None
    }
}
