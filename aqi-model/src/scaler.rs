use crate::error::{ModelError, Result};
use aqi_core::{FeatureRecord, FEATURE_COUNT};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RawScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

/// Per-feature standardisation `(x - mean) / scale` fitted at training time.
#[derive(Debug, PartialEq, Clone)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    /// A zero scale (constant training column) is treated as 1.
    pub fn new(mean: &[f64], scale: &[f64]) -> Result<Self> {
        if mean.len() != FEATURE_COUNT || scale.len() != FEATURE_COUNT {
            return Err(ModelError::InvalidArtifact(format!(
                "scaler has {} means and {} scales, expected {}",
                mean.len(),
                scale.len(),
                FEATURE_COUNT
            )));
        }
        if mean.iter().chain(scale).any(|v| !v.is_finite()) {
            return Err(ModelError::InvalidArtifact(
                "scaler contains non-finite values".to_string(),
            ));
        }
        let mut m = [0.0; FEATURE_COUNT];
        let mut s = [1.0; FEATURE_COUNT];
        m.copy_from_slice(mean);
        for (dst, src) in s.iter_mut().zip(scale) {
            *dst = if *src == 0.0 { 1.0 } else { *src };
        }
        Ok(Self { mean: m, scale: s })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawScaler = serde_json::from_str(json).map_err(|source| ModelError::Json {
            artifact: crate::SCALER_FILE.to_string(),
            source,
        })?;
        StandardScaler::new(&raw.mean, &raw.scale)
    }

    pub fn transform(&self, record: &FeatureRecord) -> [f64; FEATURE_COUNT] {
        let mut row = record.to_array();
        for ((x, m), s) in row.iter_mut().zip(&self.mean).zip(&self.scale) {
            *x = (*x - m) / s;
        }
        row
    }
}
