//! Cross-sectional risk comparison over every known location.

use aqi_core::{CategoryLabel, Classify, Environment, FeatureRecord, LocationEncoder, PmLags, Result};
use log::debug;
use serde::Serialize;

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct RiskEntry {
    pub location: String,
    pub label: CategoryLabel,
    pub risk_level: u8,
}

/// One entry per known location, highest risk first.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct RiskRanking {
    entries: Vec<RiskEntry>,
}

impl RiskRanking {
    pub fn entries(&self) -> &[RiskEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn position(&self, location: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.location == location)
    }
}

/// Classify the same lag and environment snapshot for every location the
/// encoder knows.
///
/// Entries are sorted by descending risk level. Locations with equal risk
/// keep the encoder's enumeration order.
pub fn rank_locations<C>(
    lags: &PmLags,
    environment: &Environment,
    locations: &LocationEncoder,
    classify: &C,
) -> Result<RiskRanking>
where
    C: Classify + ?Sized,
{
    let mut entries = Vec::with_capacity(locations.len());
    for location in locations.locations() {
        let code = locations.encode(location)?;
        let record = FeatureRecord::build(lags, environment, code);
        let label = classify.classify(&record)?;
        debug!("[AQI Debug] ranking: {} (code {}) -> {}", location, code, label);
        entries.push(RiskEntry {
            location: location.clone(),
            label,
            risk_level: label.risk_level(),
        });
    }
    // sort_by is stable
    entries.sort_by(|a, b| b.risk_level.cmp(&a.risk_level));
    Ok(RiskRanking { entries })
}
