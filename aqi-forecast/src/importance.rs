use aqi_core::{AqiError, Result, FEATURE_COUNT, FEATURE_NAMES};
use serde::Serialize;

#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct FeatureImportance {
    pub feature: &'static str,
    pub importance: f64,
}

/// The `n` most important features, highest first. Equal weights keep
/// feature order.
pub fn top_importances(importances: &[f64], n: usize) -> Result<Vec<FeatureImportance>> {
    if importances.len() != FEATURE_COUNT {
        return Err(AqiError::FeatureCountMismatch {
            expected: FEATURE_COUNT,
            got: importances.len(),
        });
    }
    let mut ranked: Vec<FeatureImportance> = FEATURE_NAMES
        .iter()
        .zip(importances)
        .map(|(&feature, &importance)| FeatureImportance { feature, importance })
        .collect();
    ranked.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    ranked.truncate(n);
    Ok(ranked)
}
