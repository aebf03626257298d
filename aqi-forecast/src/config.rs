//! Forecast configuration, optionally read from a JSON file.
//!
//! ```json
//! { "rolling_window": "full_history", "top_features": 5 }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// How lag and rolling-average inputs are carried from one forecast day to
/// the next.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollingWindow {
    /// Three-slot shift register; the 7-day mean is approximated by the
    /// mean of the same three slots.
    #[default]
    ShiftRegister,
    /// Seven real daily PM2.5 values; lags and both means come from a true
    /// 7-day window.
    FullHistory,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub rolling_window: RollingWindow,
    /// Number of rows in the feature importance view
    pub top_features: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        ForecastConfig {
            rolling_window: RollingWindow::ShiftRegister,
            top_features: 7,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ForecastConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ForecastConfig = serde_json::from_str(json)?;
        if config.top_features == 0 {
            return Err(ConfigError::Invalid("top_features must be at least 1".to_string()));
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = ForecastConfig::from_json(&data)?;
        log::info!(
            "[AQI Debug] config: loaded {} ({:?}, top {} features)",
            path.display(),
            config.rolling_window,
            config.top_features
        );
        Ok(config)
    }
}
