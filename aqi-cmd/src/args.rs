//! Argument groups shared by several subcommands.

use aqi_core::{Environment, PmLags, Readings};
use aqi_forecast::ForecastConfig;
use aqi_model::ModelContext;
use anyhow::Context;
use clap::Args;
use log::info;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Directory holding model.json, city_encoder.json, aqi_encoder.json and
    /// an optional feature_scaler.json. Uses the built-in demo model if unset.
    #[arg(long, env = "AQI_MODEL_DIR")]
    pub model_dir: Option<PathBuf>,
}

impl ModelArgs {
    pub fn load(&self) -> anyhow::Result<ModelContext> {
        match &self.model_dir {
            Some(dir) => {
                info!("[AQI Debug] cmd: loading model from {}", dir.display());
                ModelContext::load_dir(dir)
                    .with_context(|| format!("failed to load model from {}", dir.display()))
            }
            None => {
                info!("[AQI Debug] cmd: no model directory given, using the demo model");
                ModelContext::demo().context("failed to load the demo model")
            }
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// JSON forecast configuration (rolling_window, top_features)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn load(&self) -> anyhow::Result<ForecastConfig> {
        match &self.config {
            Some(path) => ForecastConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display())),
            None => Ok(ForecastConfig::default()),
        }
    }
}

/// Current PM2.5 history and environmental readings.
#[derive(Args, Debug, Clone)]
pub struct ReadingArgs {
    /// PM2.5 one day ago
    #[arg(long, default_value_t = 150.0)]
    pub lag1: f64,

    /// PM2.5 three days ago
    #[arg(long, default_value_t = 100.0)]
    pub lag3: f64,

    /// PM2.5 seven days ago
    #[arg(long, default_value_t = 110.0)]
    pub lag7: f64,

    /// 3-day rolling mean of PM2.5
    #[arg(long, default_value_t = 120.0)]
    pub roll3: f64,

    /// 7-day rolling mean of PM2.5
    #[arg(long, default_value_t = 110.0)]
    pub roll7: f64,

    /// Temperature (°C)
    #[arg(long, default_value_t = 36.0, allow_negative_numbers = true)]
    pub temperature: f64,

    /// Relative humidity (%)
    #[arg(long, default_value_t = 50.0)]
    pub humidity: f64,

    /// Wind speed
    #[arg(long, default_value_t = 5.0)]
    pub wind_speed: f64,

    #[arg(long, default_value_t = 90.0)]
    pub pm10: f64,

    #[arg(long, default_value_t = 120.0)]
    pub no2: f64,

    #[arg(long, default_value_t = 50.0)]
    pub o3: f64,

    #[arg(long, default_value_t = 25.0)]
    pub so2: f64,

    #[arg(long, default_value_t = 1.0)]
    pub co: f64,
}

impl ReadingArgs {
    /// Collect and validate the readings.
    pub fn readings(&self) -> anyhow::Result<Readings> {
        let readings = Readings {
            lags: PmLags {
                lag1: self.lag1,
                lag3: self.lag3,
                lag7: self.lag7,
                roll3: self.roll3,
                roll7: self.roll7,
            },
            environment: Environment {
                temperature: self.temperature,
                humidity: self.humidity,
                wind_speed: self.wind_speed,
                pm10: self.pm10,
                no2: self.no2,
                o3: self.o3,
                so2: self.so2,
                co: self.co,
            },
        };
        readings.validate().context("invalid readings")?;
        Ok(readings)
    }
}
