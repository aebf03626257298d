//! The multi-day forecast loop.
//!
//! Each day's predicted category is mapped back to a representative PM2.5
//! value and fed into the lag state for the next day.

use crate::lag::LagTracker;
use aqi_core::{Advisory, CategoryLabel, Classify, Environment, FeatureRecord, Result};
use log::debug;
use serde::Serialize;

/// Number of days forecast per run.
pub const FORECAST_HORIZON: usize = 3;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub struct ForecastStep {
    /// 1-based day index
    pub day: usize,
    pub label: CategoryLabel,
}

impl ForecastStep {
    /// "Day 1", "Day 2", ...
    pub fn day_name(&self) -> String {
        format!("Day {}", self.day)
    }

    pub fn risk_level(&self) -> u8 {
        self.label.risk_level()
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct Forecast {
    steps: Vec<ForecastStep>,
}

impl Forecast {
    pub fn steps(&self) -> &[ForecastStep] {
        &self.steps
    }

    /// `(day, risk level)` points for a trend chart.
    pub fn trend(&self) -> Vec<(usize, u8)> {
        self.steps.iter().map(|s| (s.day, s.risk_level())).collect()
    }

    pub fn advisories(&self) -> Vec<(usize, Advisory)> {
        self.steps.iter().map(|s| (s.day, s.label.advisory())).collect()
    }

    /// Highest risk level over the horizon.
    pub fn peak(&self) -> Option<ForecastStep> {
        // max_by_key keeps the last maximum; iterate reversed to report the earliest day
        self.steps.iter().rev().max_by_key(|s| s.risk_level()).copied()
    }
}

/// Run the forecast for one location.
///
/// Environmental readings are held constant across all days. A failing
/// `classify` aborts the run and its error is returned unchanged.
pub fn forecast<T, C>(mut tracker: T, environment: &Environment, location_code: usize, classify: &C) -> Result<Forecast>
where
    T: LagTracker,
    C: Classify + ?Sized,
{
    let mut steps = Vec::with_capacity(FORECAST_HORIZON);
    for day in 1..=FORECAST_HORIZON {
        let record = FeatureRecord::build(&tracker.lags(), environment, location_code);
        let label = classify.classify(&record)?;
        let pm = label.representative_pm();
        debug!(
            "[AQI Debug] forecast: day {} location {} lag1 {:.2} roll3 {:.2} roll7 {:.2} -> {} (pm {})",
            day, location_code, record.pm2_5_lag1, record.pm2_5_roll3, record.pm2_5_roll7, label, pm
        );
        steps.push(ForecastStep { day, label });
        tracker.push(pm);
    }
    Ok(Forecast { steps })
}
