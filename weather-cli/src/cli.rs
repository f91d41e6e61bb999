use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::Password;
use std::path::PathBuf;
use weather_core::{Config, ForecastSession, OpenWeatherClient, WeatherClient, WeatherQuery};

use crate::{interactive, render};

/// City shown when `weather` runs without a subcommand.
pub const DEFAULT_CITY: &str = "Stockholm";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    /// Without a subcommand, print current weather for Stockholm.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print current weather for a city.
    Current {
        /// City name, e.g. "Stockholm".
        city: Option<String>,
    },

    /// Browse forecasts interactively, with recent-city history and a chart.
    Interactive {
        /// Where to write the temperature chart (SVG).
        #[arg(long, default_value = "weather-forecast.svg")]
        chart: PathBuf,
    },

    /// Store an OpenWeather API key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let command = self.command.unwrap_or(Command::Current { city: None });

        match command {
            Command::Current { city } => {
                let config = Config::resolve();
                let client = OpenWeatherClient::from_config(&config);
                let city = city.as_deref().unwrap_or(DEFAULT_CITY);

                for line in current_report(&client, city).await {
                    println!("{line}");
                }
            }
            Command::Interactive { chart } => {
                let config = Config::resolve();
                let mut session = ForecastSession::new(OpenWeatherClient::from_config(&config));
                interactive::run(&mut session, &chart).await?;
            }
            Command::Configure => {
                let api_key = Password::new("OpenWeather API key:")
                    .without_confirmation()
                    .prompt()
                    .context("Failed to read API key")?;

                let mut config = Config::load()?;
                config.set_api_key(api_key.trim().to_string());
                let path = config.save()?;

                println!("Saved API key to {}", path.display());
            }
        }

        Ok(())
    }
}

/// Fetch current weather and turn the outcome into printable lines.
///
/// Failures become an error line; they never abort the program.
async fn current_report<C: WeatherClient>(client: &C, input: &str) -> Vec<String> {
    let query = WeatherQuery::from_input(input);
    let outcome = client.fetch_current(&query.city).await;

    if let Err(err) = &outcome {
        tracing::warn!(city = %query.city, error = %err, "current weather lookup failed");
    }

    render::console_report(&query.city, &outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use weather_core::{ForecastSeries, WeatherError, WeatherReading};

    #[derive(Debug)]
    struct StubClient;

    #[async_trait]
    impl WeatherClient for StubClient {
        async fn fetch_current(&self, city: &str) -> Result<WeatherReading, WeatherError> {
            match city {
                "" => Err(WeatherError::EmptyCity),
                "Stockholm" => Ok(WeatherReading {
                    temperature_c: 8.27,
                    humidity_pct: 81,
                    pressure_hpa: 1012,
                    wind_speed_mps: 5.14,
                    description: "overcast clouds".into(),
                    timestamp: None,
                }),
                _ => Err(WeatherError::MissingApiKey),
            }
        }

        async fn fetch_forecast(&self, _city: &str) -> Result<ForecastSeries, WeatherError> {
            Ok(ForecastSeries::default())
        }
    }

    #[test]
    fn no_subcommand_means_default_city() {
        let cli = Cli::try_parse_from(["weather"]).expect("parse");
        assert!(cli.command.is_none());
    }

    #[test]
    fn interactive_chart_path_defaults() {
        let cli = Cli::try_parse_from(["weather", "interactive"]).expect("parse");
        match cli.command {
            Some(Command::Interactive { chart }) => {
                assert_eq!(chart, PathBuf::from("weather-forecast.svg"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn current_accepts_city() {
        let cli = Cli::try_parse_from(["weather", "current", "Oslo"]).expect("parse");
        assert!(matches!(
            cli.command,
            Some(Command::Current { city: Some(ref c) }) if c == "Oslo"
        ));
    }

    #[test]
    fn configure_takes_no_arguments() {
        let cli = Cli::try_parse_from(["weather", "configure"]).expect("parse");
        assert!(matches!(cli.command, Some(Command::Configure)));
        assert!(Cli::try_parse_from(["weather", "configure", "extra"]).is_err());
    }

    #[tokio::test]
    async fn report_prints_fields_for_known_city() {
        let lines = current_report(&StubClient, " Stockholm ").await;
        assert_eq!(lines[0], "City: Stockholm");
        assert_eq!(lines[1], "Temperature: 8.27°C");
        assert_eq!(lines[5], "Weather Description: overcast clouds");
    }

    #[tokio::test]
    async fn broken_config_file_without_key_prints_error_line() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_key = [").expect("write");

        let config = Config::resolve_from(&path, |_| None);
        let client = OpenWeatherClient::from_config(&config);

        assert_eq!(
            current_report(&client, DEFAULT_CITY).await,
            vec![render::CONSOLE_ERROR]
        );
    }

    #[tokio::test]
    async fn report_prints_single_error_line_on_failure() {
        assert_eq!(
            current_report(&StubClient, "Atlantis").await,
            vec![render::CONSOLE_ERROR]
        );
        assert_eq!(
            current_report(&StubClient, "  ").await,
            vec![render::INPUT_WARNING]
        );
    }
}
