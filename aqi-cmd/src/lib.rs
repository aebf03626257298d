//! Command implementations for the AQI forecast CLI.
//!
//! Every subcommand loads the model once, runs synchronously and prints to
//! stdout.

use clap::Subcommand;
use std::path::PathBuf;

pub mod args;
pub mod export;
pub mod predict;
pub mod report;

use args::{ConfigArgs, ModelArgs, ReadingArgs};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Forecast the next three days for one city, with alerts, trend,
    /// feature importance and the city risk ranking
    Predict {
        /// City to forecast
        #[arg(short, long)]
        city: String,

        #[command(flatten)]
        model: ModelArgs,

        #[command(flatten)]
        config: ConfigArgs,

        #[command(flatten)]
        readings: ReadingArgs,

        /// Seven daily PM2.5 values, most recent first (full_history mode)
        #[arg(long, value_delimiter = ',')]
        history: Option<Vec<f64>>,

        /// Issue date used to label forecast days (YYYY-MM-DD, default today)
        #[arg(long)]
        issued: Option<String>,

        /// Directory to write <city>_AQI_Forecast.csv into
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Print the forecast and ranking as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Rank every known city by predicted risk for the current readings
    Rank {
        #[command(flatten)]
        model: ModelArgs,

        #[command(flatten)]
        readings: ReadingArgs,

        /// Print the ranking as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the model's most important features
    Importance {
        #[command(flatten)]
        model: ModelArgs,

        #[command(flatten)]
        config: ConfigArgs,

        /// Number of features to show (overrides top_features from --config)
        #[arg(short = 'n', long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        top: Option<usize>,
    },

    /// List the cities the model knows
    Locations {
        #[command(flatten)]
        model: ModelArgs,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Predict {
            city,
            model,
            config,
            readings,
            history,
            issued,
            export,
            json,
        } => {
            let request = predict::PredictRequest {
                city,
                history,
                issued,
                export,
                json,
            };
            predict::run_predict(&model, &config, &readings, &request)
        }
        Command::Rank {
            model,
            readings,
            json,
        } => predict::run_rank(&model, &readings, json),
        Command::Importance { model, config, top } => predict::run_importance(&model, &config, top),
        Command::Locations { model } => predict::run_locations(&model),
    }
}
