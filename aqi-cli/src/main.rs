//! AQI CLI - iterative air quality category forecasts and city risk ranking.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "aqi-cli",
    version,
    about = "AQI category forecast toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: aqi_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("[AQI Debug] cli: {:?}", cli.command);
    aqi_cmd::run(cli.command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn importance_count_must_be_positive() {
        assert!(Cli::try_parse_from(["aqi-cli", "importance", "-n", "0"]).is_err());
        let cli = Cli::try_parse_from(["aqi-cli", "importance", "-n", "3"]).unwrap();
        match cli.command {
            aqi_cmd::Command::Importance { top, .. } => assert_eq!(top, Some(3)),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn predict_parses_history_list() {
        let cli = Cli::try_parse_from([
            "aqi-cli", "predict", "--city", "Lahore", "--history", "70,60,50,40,30,20,10",
        ])
        .unwrap();
        match cli.command {
            aqi_cmd::Command::Predict { city, history, .. } => {
                assert_eq!(city, "Lahore");
                assert_eq!(history.map(|h| h.len()), Some(7));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
