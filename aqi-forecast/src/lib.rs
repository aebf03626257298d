//! Iterative AQI category forecasting and per-location risk ranking.
//!
//! Both engines take any [`aqi_core::Classify`] implementation, so they run
//! the same against a loaded model or a test stub.
//!
//! ```rust
//! use aqi_core::{CategoryLabel, Environment, FeatureRecord, PmLags};
//! use aqi_forecast::{forecast, LagState};
//!
//! let lags = PmLags { lag1: 150.0, lag3: 100.0, lag7: 110.0, roll3: 120.0, roll7: 110.0 };
//! let env = Environment {
//!     temperature: 36.0, humidity: 50.0, wind_speed: 5.0,
//!     pm10: 90.0, no2: 120.0, o3: 50.0, so2: 25.0, co: 1.0,
//! };
//! let classify = |_: &FeatureRecord| -> aqi_core::Result<CategoryLabel> { Ok(CategoryLabel::Unhealthy) };
//! let result = forecast(LagState::new(lags), &env, 0, &classify).unwrap();
//! assert_eq!(result.steps().len(), 3);
//! ```

pub mod config;
pub mod importance;
pub mod lag;
pub mod ranking;
pub mod recurrence;

pub use config::{ConfigError, ForecastConfig, RollingWindow};
pub use importance::{top_importances, FeatureImportance};
pub use lag::{DailyHistory, LagState, LagTracker, LagWindow, HISTORY_DAYS};
pub use ranking::{rank_locations, RiskEntry, RiskRanking};
pub use recurrence::{forecast, Forecast, ForecastStep, FORECAST_HORIZON};
