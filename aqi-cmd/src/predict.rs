//! The predict, rank, importance and locations subcommands.

use crate::args::{ConfigArgs, ModelArgs, ReadingArgs};
use crate::{export, report};
use aqi_core::Readings;
use aqi_forecast::{
    forecast, rank_locations, top_importances, FeatureImportance, Forecast, ForecastConfig, LagWindow,
    RiskRanking,
};
use aqi_model::ModelContext;
use aqi_utils::dates::{parse_date, today};
use anyhow::Context;
use log::info;
use serde_json::json;
use std::path::PathBuf;

/// Options specific to the predict subcommand.
#[derive(Debug, Clone, Default)]
pub struct PredictRequest {
    pub city: String,
    pub history: Option<Vec<f64>>,
    pub issued: Option<String>,
    pub export: Option<PathBuf>,
    pub json: bool,
}

/// Everything one predict run produces.
#[derive(Debug)]
pub struct Prediction {
    pub forecast: Forecast,
    pub ranking: RiskRanking,
    /// None when the model carries no importances
    pub importances: Option<Vec<FeatureImportance>>,
}

/// Forecast `city`, rank all cities on the same readings and collect the
/// top feature importances.
pub fn predict(
    ctx: &ModelContext,
    config: &ForecastConfig,
    readings: &Readings,
    city: &str,
    history: Option<&[f64]>,
) -> anyhow::Result<Prediction> {
    let code = ctx.locations().encode(city)?;
    let window = LagWindow::from_config(readings, history, config)?;
    info!(
        "[AQI Debug] predict: forecasting {} (code {}) with {:?}",
        city, code, config.rolling_window
    );
    let forecast = forecast(window, &readings.environment, code, ctx)
        .with_context(|| format!("forecast for {} failed", city))?;
    let ranking = rank_locations(&readings.lags, &readings.environment, ctx.locations(), ctx)
        .context("city risk ranking failed")?;
    let importances = importances(ctx, config.top_features)?;
    Ok(Prediction {
        forecast,
        ranking,
        importances,
    })
}

fn importances(ctx: &ModelContext, n: usize) -> anyhow::Result<Option<Vec<FeatureImportance>>> {
    anyhow::ensure!(n >= 1, "the number of features to show must be at least 1");
    match ctx.feature_importances() {
        Some(weights) => Ok(Some(top_importances(weights, n)?)),
        None => {
            info!("[AQI Debug] predict: model has no feature importances");
            Ok(None)
        }
    }
}

pub fn run_predict(
    model: &ModelArgs,
    config: &ConfigArgs,
    readings: &ReadingArgs,
    request: &PredictRequest,
) -> anyhow::Result<()> {
    let ctx = model.load()?;
    let config = config.load()?;
    let readings = readings.readings()?;
    let issued = match &request.issued {
        Some(s) => parse_date(s)?,
        None => today(),
    };

    let prediction = predict(&ctx, &config, &readings, &request.city, request.history.as_deref())?;

    if request.json {
        let value = json!({
            "city": request.city,
            "issued": issued,
            "forecast": prediction.forecast,
            "ranking": prediction.ranking,
            "feature_importance": prediction.importances,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", report::render_forecast(&request.city, &prediction.forecast, &issued)?);
        println!("{}", report::render_trend(&prediction.forecast)?);
        if let Some(top) = &prediction.importances {
            println!("{}", report::render_importance(top)?);
        }
        print!("{}", report::render_ranking(&prediction.ranking, Some(&request.city))?);
    }

    if let Some(dir) = &request.export {
        let path = export::export_forecast(dir, &request.city, &prediction.forecast)
            .with_context(|| format!("failed to export forecast to {}", dir.display()))?;
        eprintln!("Forecast written to {}", path.display());
    }
    Ok(())
}

pub fn run_rank(model: &ModelArgs, readings: &ReadingArgs, json: bool) -> anyhow::Result<()> {
    let ctx = model.load()?;
    let readings = readings.readings()?;
    let ranking = rank_locations(&readings.lags, &readings.environment, ctx.locations(), &ctx)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&ranking)?);
    } else {
        print!("{}", report::render_ranking(&ranking, None)?);
    }
    Ok(())
}

pub fn run_importance(model: &ModelArgs, config: &ConfigArgs, top: Option<usize>) -> anyhow::Result<()> {
    let ctx = model.load()?;
    let n = match top {
        Some(n) => n,
        None => config.load()?.top_features,
    };
    match importances(&ctx, n)? {
        Some(top) => print!("{}", report::render_importance(&top)?),
        None => println!("The loaded model does not report feature importances."),
    }
    Ok(())
}

pub fn run_locations(model: &ModelArgs) -> anyhow::Result<()> {
    let ctx = model.load()?;
    for (code, location) in ctx.locations().locations().iter().enumerate() {
        println!("{:>2} {}", code, location);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqi_core::{AqiError, CategoryLabel, Environment, PmLags};
    use aqi_forecast::RollingWindow;

    fn readings() -> Readings {
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
    fn demo_prediction_for_lahore() {
        let ctx = ModelContext::demo().unwrap();
        let p = predict(&ctx, &ForecastConfig::default(), &readings(), "Lahore", None).unwrap();

        // fed-back 130s lift roll3 past the 130 split on day 3
        let labels: Vec<CategoryLabel> = p.forecast.steps().iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            vec![
                CategoryLabel::UnhealthyForSensitive,
                CategoryLabel::UnhealthyForSensitive,
                CategoryLabel::Unhealthy
            ]
        );

        let order: Vec<&str> = p.ranking.entries().iter().map(|e| e.location.as_str()).collect();
        assert_eq!(
            order,
            vec![
                "Karachi",
                "Lahore",
                "Faisalabad",
                "Islamabad",
                "Multan",
                "Peshawar",
                "Quetta",
                "Rawalpindi"
            ]
        );

        let top = p.importances.unwrap();
        assert_eq!(top.len(), 7);
        assert_eq!(top[0].feature, "pm2_5_lag1");
        assert_eq!(top[1].feature, "pm2_5_roll3");
    }

    #[test]
    fn zero_top_features_is_rejected() {
        let ctx = ModelContext::demo().unwrap();
        assert!(importances(&ctx, 0).is_err());
        assert_eq!(importances(&ctx, 1).unwrap().map(|t| t.len()), Some(1));
    }

    #[test]
    fn unknown_city_is_rejected() {
        let ctx = ModelContext::demo().unwrap();
        let err = predict(&ctx, &ForecastConfig::default(), &readings(), "Gotham", None).unwrap_err();
        assert_eq!(
            err.downcast_ref::<AqiError>(),
            Some(&AqiError::UnknownLocation("Gotham".to_string()))
        );
    }

    #[test]
    fn full_history_mode_needs_history() {
        let ctx = ModelContext::demo().unwrap();
        let config = ForecastConfig {
            rolling_window: RollingWindow::FullHistory,
            top_features: 3,
        };
        assert!(predict(&ctx, &config, &readings(), "Lahore", None).is_err());

        let history = [150.0, 140.0, 100.0, 120.0, 110.0, 100.0, 110.0];
        let p = predict(&ctx, &config, &readings(), "Lahore", Some(&history)).unwrap();
        assert_eq!(p.forecast.steps().len(), 3);
        assert_eq!(p.importances.map(|t| t.len()), Some(3));
    }
}
