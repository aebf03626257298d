//! Model input features and the readings they are built from.

use crate::error::{AqiError, Result};
use serde::{Deserialize, Serialize};

/// Number of columns in a [`FeatureRecord`].
pub const FEATURE_COUNT: usize = 14;

/// Column names in the order the classifier was trained on.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "pm2_5_lag1",
    "pm2_5_lag3",
    "pm2_5_lag7",
    "pm2_5_roll3",
    "pm2_5_roll7",
    "temperature",
    "humidity",
    "wind_speed",
    "pm10",
    "no2",
    "o3",
    "so2",
    "co",
    "location_code",
];

/// PM2.5 lag and rolling-average inputs (µg/m³).
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct PmLags {
    /// Previous day
    pub lag1: f64,
    /// Three days ago
    pub lag3: f64,
    /// Seven days ago
    pub lag7: f64,
    /// 3-day rolling mean
    pub roll3: f64,
    /// 7-day rolling mean
    pub roll7: f64,
}

/// Weather and co-pollutant readings, held constant across a forecast run.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Environment {
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity, percent
    pub humidity: f64,
    /// Metres per second
    pub wind_speed: f64,
    pub pm10: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub co: f64,
}

/// Everything the user enters for one prediction request.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Readings {
    pub lags: PmLags,
    pub environment: Environment,
}

impl Readings {
    /// Range check at the input boundary.
    ///
    /// PM2.5 lags, rolling means and the five pollutant concentrations must
    /// be non-negative; every value must be finite.
    pub fn validate(&self) -> Result<()> {
        let l = &self.lags;
        let e = &self.environment;
        let non_negative = [
            ("pm2_5_lag1", l.lag1),
            ("pm2_5_lag3", l.lag3),
            ("pm2_5_lag7", l.lag7),
            ("pm2_5_roll3", l.roll3),
            ("pm2_5_roll7", l.roll7),
            ("pm10", e.pm10),
            ("no2", e.no2),
            ("o3", e.o3),
            ("so2", e.so2),
            ("co", e.co),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(AqiError::InvalidReading { field, value });
            }
        }
        let signed = [
            ("temperature", e.temperature),
            ("humidity", e.humidity),
            ("wind_speed", e.wind_speed),
        ];
        for (field, value) in signed {
            if !value.is_finite() {
                return Err(AqiError::InvalidReading { field, value });
            }
        }
        Ok(())
    }
}

/// One row of classifier input, in [`FEATURE_NAMES`] order.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct FeatureRecord {
    pub pm2_5_lag1: f64,
    pub pm2_5_lag3: f64,
    pub pm2_5_lag7: f64,
    pub pm2_5_roll3: f64,
    pub pm2_5_roll7: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub pm10: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub co: f64,
    pub location_code: usize,
}

impl FeatureRecord {
    pub fn build(lags: &PmLags, environment: &Environment, location_code: usize) -> Self {
        FeatureRecord {
            pm2_5_lag1: lags.lag1,
            pm2_5_lag3: lags.lag3,
            pm2_5_lag7: lags.lag7,
            pm2_5_roll3: lags.roll3,
            pm2_5_roll7: lags.roll7,
            temperature: environment.temperature,
            humidity: environment.humidity,
            wind_speed: environment.wind_speed,
            pm10: environment.pm10,
            no2: environment.no2,
            o3: environment.o3,
            so2: environment.so2,
            co: environment.co,
            location_code,
        }
    }

    /// Flatten into the column order the model expects.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.pm2_5_lag1,
            self.pm2_5_lag3,
            self.pm2_5_lag7,
            self.pm2_5_roll3,
            self.pm2_5_roll7,
            self.temperature,
            self.humidity,
            self.wind_speed,
            self.pm10,
            self.no2,
            self.o3,
            self.so2,
            self.co,
            self.location_code as f64,
        ]
    }

    pub fn lags(&self) -> PmLags {
        PmLags {
            lag1: self.pm2_5_lag1,
            lag3: self.pm2_5_lag3,
            lag7: self.pm2_5_lag7,
            roll3: self.pm2_5_roll3,
            roll7: self.pm2_5_roll7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_readings() -> Readings {
        Readings {
            lags: PmLags {
                lag1: 150.0,
                lag3: 100.0,
                lag7: 110.0,
                roll3: 120.0,
                roll7: 110.0,
            },
            environment: Environment {
                temperature: 36.0,
                humidity: 50.0,
                wind_speed: 5.0,
                pm10: 90.0,
                no2: 120.0,
                o3: 50.0,
                so2: 25.0,
                co: 1.0,
            },
        }
    }

    #[test]
    fn build_keeps_column_order() {
        let r = sample_readings();
        let record = FeatureRecord::build(&r.lags, &r.environment, 3);
        let row = record.to_array();
        assert_eq!(
            row,
            [150.0, 100.0, 110.0, 120.0, 110.0, 36.0, 50.0, 5.0, 90.0, 120.0, 50.0, 25.0, 1.0, 3.0]
        );
        assert_eq!(record.lags(), r.lags);
    }

    #[test]
    fn feature_names_match_record_width() {
        assert_eq!(FEATURE_NAMES.len(), FEATURE_COUNT);
        assert_eq!(FEATURE_NAMES[0], "pm2_5_lag1");
        assert_eq!(FEATURE_NAMES[FEATURE_COUNT - 1], "location_code");
    }

    #[test]
    fn validate_accepts_defaults_and_negative_temperature() {
        let mut r = sample_readings();
        assert!(r.validate().is_ok());
        r.environment.temperature = -12.0;
        assert!(r.validate().is_ok());
    }

    #[test]
    fn validate_rejects_negative_pollutants() {
        let mut r = sample_readings();
        r.environment.so2 = -1.0;
        assert_eq!(
            r.validate(),
            Err(AqiError::InvalidReading {
                field: "so2",
                value: -1.0
            })
        );

        let mut r = sample_readings();
        r.lags.roll7 = -0.5;
        let err = r.validate().unwrap_err();
        assert!(matches!(err, AqiError::InvalidReading { field: "pm2_5_roll7", .. }));
        assert!(!err.is_configuration_error());
    }

    #[test]
    fn validate_rejects_non_finite() {
        let mut r = sample_readings();
        r.environment.humidity = f64::NAN;
        assert!(matches!(
            r.validate(),
            Err(AqiError::InvalidReading { field: "humidity", .. })
        ));
    }
}
