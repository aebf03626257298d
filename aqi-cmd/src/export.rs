//! CSV export of a forecast.

use aqi_forecast::Forecast;
use log::info;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const CSV_HEADER: [&str; 2] = ["Day", "Predicted AQI"];

/// `<city>_AQI_Forecast.csv`
pub fn forecast_file_name(city: &str) -> String {
    format!("{}_AQI_Forecast.csv", city)
}

/// Write `Day,Predicted AQI` followed by one row per forecast day.
pub fn write_forecast_csv<W: Write>(writer: W, forecast: &Forecast) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for step in forecast.steps() {
        wtr.write_record([step.day_name().as_str(), step.label.name()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the forecast for `city` into `dir`, returning the file path.
pub fn export_forecast(dir: &Path, city: &str, forecast: &Forecast) -> anyhow::Result<PathBuf> {
    let path = dir.join(forecast_file_name(city));
    let file = std::fs::File::create(&path)?;
    write_forecast_csv(file, forecast)?;
    info!("[AQI Debug] export: wrote {}", path.display());
    Ok(path)
}
