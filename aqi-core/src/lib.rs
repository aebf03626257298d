//! Core types for air quality category forecasting.
//!
//! - [`category`]: the five ordinal AQI categories and their PM2.5 / risk table
//! - [`feature`]: user readings and the fixed-order classifier input row
//! - [`encoder`]: location and label encoders shipped with a trained model
//! - [`classify`]: the seam between the forecast engines and a classifier

pub mod category;
pub mod classify;
pub mod encoder;
pub mod error;
pub mod feature;

pub use category::{Advisory, AlertLevel, CategoryLabel, CATEGORY_TABLE};
pub use classify::Classify;
pub use encoder::{LabelEncoder, LocationEncoder};
pub use error::{AqiError, Result};
pub use feature::{Environment, FeatureRecord, PmLags, Readings, FEATURE_COUNT, FEATURE_NAMES};
