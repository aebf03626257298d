//! Plain-text rendering of forecasts, rankings and feature importance.

use aqi_core::AlertLevel;
use aqi_forecast::{FeatureImportance, Forecast, RiskRanking};
use aqi_utils::dates::{forecast_date, format_date};
use chrono::NaiveDate;
use std::fmt::Write;

fn alert_tag(level: AlertLevel) -> &'static str {
    match level {
        AlertLevel::Success => "OK",
        AlertLevel::Warning => "CAUTION",
        AlertLevel::Danger => "DANGER",
    }
}

/// Forecast table followed by one advisory line per day.
pub fn render_forecast(city: &str, forecast: &Forecast, issued: &NaiveDate) -> anyhow::Result<String> {
    let mut out = String::new();
    writeln!(out, "3-day AQI forecast for {} (issued {})", city, format_date(issued))?;
    writeln!(out, "{:<6} {:<10} {:<24} {}", "Day", "Date", "Predicted AQI", "Risk")?;
    for step in forecast.steps() {
        let date = forecast_date(issued, step.day)?;
        writeln!(
            out,
            "{:<6} {:<10} {:<24} {}",
            step.day_name(),
            format_date(&date),
            step.label.name(),
            step.risk_level()
        )?;
    }
    writeln!(out)?;
    for (day, advisory) in forecast.advisories() {
        writeln!(out, "[{}] Day {}: {}", alert_tag(advisory.level), day, advisory.message)?;
    }
    if let Some(peak) = forecast.peak() {
        writeln!(
            out,
            "Peak risk: {} ({}, risk {})",
            peak.day_name(),
            peak.label.name(),
            peak.risk_level()
        )?;
    }
    Ok(out)
}

/// Risk level per day as a horizontal bar.
pub fn render_trend(forecast: &Forecast) -> anyhow::Result<String> {
    let mut out = String::new();
    writeln!(out, "Risk trend")?;
    for (day, risk) in forecast.trend() {
        writeln!(out, "Day {} {:<5} {}", day, "#".repeat(risk as usize), risk)?;
    }
    Ok(out)
}

pub fn render_importance(importances: &[FeatureImportance]) -> anyhow::Result<String> {
    let mut out = String::new();
    writeln!(out, "Top {} features", importances.len())?;
    for fi in importances {
        writeln!(out, "{:<14} {:.4}", fi.feature, fi.importance)?;
    }
    Ok(out)
}

/// Ranking table; when `city` is given, a closing line with its place.
pub fn render_ranking(ranking: &RiskRanking, city: Option<&str>) -> anyhow::Result<String> {
    let mut out = String::new();
    writeln!(out, "City risk ranking")?;
    writeln!(out, "{:<4} {:<16} {:<24} {}", "#", "City", "AQI", "Risk")?;
    for (i, entry) in ranking.entries().iter().enumerate() {
        writeln!(
            out,
            "{:<4} {:<16} {:<24} {}",
            i + 1,
            entry.location,
            entry.label.name(),
            entry.risk_level
        )?;
    }
    if let Some(city) = city {
        if let Some(pos) = ranking.position(city) {
            writeln!(out, "{} ranks {} of {}", city, pos + 1, ranking.len())?;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqi_core::{CategoryLabel, Environment, FeatureRecord, LocationEncoder, PmLags};
    use aqi_forecast::{forecast, rank_locations, top_importances, LagState};

    fn lags() -> PmLags {
        PmLags {
            lag1: 150.0,
            lag3: 100.0,
            lag7: 110.0,
            roll3: 120.0,
            roll7: 110.0,
        }
    }

    fn env() -> Environment {
        Environment {
            temperature: 36.0,
            humidity: 50.0,
            wind_speed: 5.0,
            pm10: 90.0,
            no2: 120.0,
            o3: 50.0,
            so2: 25.0,
            co: 1.0,
        }
    }

    fn good_then_moderate(r: &FeatureRecord) -> aqi_core::Result<CategoryLabel> {
        Ok(if r.pm2_5_lag1 > 100.0 {
            CategoryLabel::Good
        } else {
            CategoryLabel::Moderate
        })
    }

    #[test]
    fn forecast_report_lists_dates_and_advisories() {
        let fc = forecast(LagState::new(lags()), &env(), 0, &good_then_moderate).unwrap();
        let issued = NaiveDate::from_ymd_opt(2024, 11, 5).unwrap();
        let text = render_forecast("Lahore", &fc, &issued).unwrap();
        assert!(text.starts_with("3-day AQI forecast for Lahore (issued 2024-11-05)"));
        assert!(text.contains("2024-11-06"));
        assert!(text.contains("2024-11-08"));
        assert!(text.contains("[OK] Day 1: Safe for outdoor activities"));
        assert!(text.contains("[CAUTION] Day 2: Sensitive groups should be cautious"));
        assert!(text.contains("Peak risk: Day 2 (Moderate, risk 2)"));
    }

    #[test]
    fn trend_draws_one_bar_per_day() {
        let fc = forecast(LagState::new(lags()), &env(), 0, &good_then_moderate).unwrap();
        let text = render_trend(&fc).unwrap();
        assert!(text.contains("Day 1 #     1"));
        assert!(text.contains("Day 2 ##    2"));
    }

    #[test]
    fn ranking_report_is_numbered() {
        let locations = LocationEncoder::new(vec!["Karachi".to_string(), "Lahore".to_string()]).unwrap();
        let by_code = |r: &FeatureRecord| -> aqi_core::Result<CategoryLabel> {
            Ok(if r.location_code == 1 {
                CategoryLabel::VeryUnhealthy
            } else {
                CategoryLabel::Good
            })
        };
        let ranking = rank_locations(&lags(), &env(), &locations, &by_code).unwrap();
        let text = render_ranking(&ranking, None).unwrap();
        let rows: Vec<&str> = text.lines().skip(2).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("1    Lahore"));
        assert!(rows[1].starts_with("2    Karachi"));

        let text = render_ranking(&ranking, Some("Karachi")).unwrap();
        assert_eq!(text.lines().last(), Some("Karachi ranks 2 of 2"));
        let text = render_ranking(&ranking, Some("Gotham")).unwrap();
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn importance_report_has_a_row_per_feature() {
        let weights = [0.30, 0.04, 0.03, 0.22, 0.05, 0.03, 0.04, 0.09, 0.12, 0.03, 0.01, 0.01, 0.01, 0.02];
        let top = top_importances(&weights, 3).unwrap();
        let text = render_importance(&top).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("pm2_5_lag1     0.3000"));
    }
}
