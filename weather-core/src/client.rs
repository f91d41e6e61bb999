use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;

use crate::{
    config::Config,
    error::WeatherError,
    model::{ForecastSeries, WeatherReading},
};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[async_trait]
pub trait WeatherClient: Send + Sync + Debug {
    async fn fetch_current(&self, city: &str) -> Result<WeatherReading, WeatherError>;
    async fn fetch_forecast(&self, city: &str) -> Result<ForecastSeries, WeatherError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Current,
    Forecast,
}

impl Endpoint {
    fn path(self) -> &'static str {
        match self {
            Endpoint::Current => "weather",
            Endpoint::Forecast => "forecast",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Endpoint::Current => "current",
            Endpoint::Forecast => "forecast",
        }
    }
}

/// Client for the OpenWeatherMap current-weather and 5-day forecast endpoints.
///
/// Every call is a single attempt; there is no retry and no caching.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Point the client at another server, e.g. a proxy or a test double.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build a client from resolved configuration.
    ///
    /// A missing key is not an error here: the client fails every call instead.
    pub fn from_config(config: &Config) -> Self {
        let client = Self::new(config.api_key().unwrap_or_default());
        match config.base_url.as_deref() {
            Some(url) => client.with_base_url(url),
            None => client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_body(&self, endpoint: Endpoint, city: &str) -> Result<String, WeatherError> {
        if city.is_empty() {
            return Err(WeatherError::EmptyCity);
        }
        if self.api_key.trim().is_empty() {
            return Err(WeatherError::MissingApiKey);
        }

        let url = format!("{}/{}", self.base_url, endpoint.path());
        tracing::debug!(city, endpoint = endpoint.label(), "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|source| WeatherError::Transport {
                endpoint: endpoint.label(),
                source,
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|source| WeatherError::Transport {
            endpoint: endpoint.label(),
            source,
        })?;

        if !status.is_success() {
            tracing::warn!(city, endpoint = endpoint.label(), %status, "OpenWeather request failed");
            return Err(WeatherError::Status {
                endpoint: endpoint.label(),
                status,
                body: truncate_body(&body),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    async fn fetch_current(&self, city: &str) -> Result<WeatherReading, WeatherError> {
        let body = self.get_body(Endpoint::Current, city).await?;
        parse_current(&body)
    }

    async fn fetch_forecast(&self, city: &str) -> Result<ForecastSeries, WeatherError> {
        let body = self.get_body(Endpoint::Forecast, city).await?;
        let series = parse_forecast(&body)?;
        tracing::debug!(city, entries = series.len(), "parsed OpenWeather forecast");
        Ok(series)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    dt: Option<i64>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: Option<OwCity>,
    list: Vec<OwForecastEntry>,
}

/// Parse a current-weather response body.
pub fn parse_current(body: &str) -> Result<WeatherReading, WeatherError> {
    const ENDPOINT: &str = "current";

    let parsed: OwCurrentResponse =
        serde_json::from_str(body).map_err(|e| WeatherError::parse(ENDPOINT, e.to_string()))?;

    let timestamp = parsed
        .dt
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.naive_utc());

    build_reading(ENDPOINT, parsed.main, parsed.wind, &parsed.weather, timestamp)
}

/// Parse a 5-day/3-hour forecast response body.
pub fn parse_forecast(body: &str) -> Result<ForecastSeries, WeatherError> {
    const ENDPOINT: &str = "forecast";

    let parsed: OwForecastResponse =
        serde_json::from_str(body).map_err(|e| WeatherError::parse(ENDPOINT, e.to_string()))?;

    let readings = parsed
        .list
        .into_iter()
        .map(|entry| {
            let timestamp = NaiveDateTime::parse_from_str(&entry.dt_txt, DT_TXT_FORMAT)
                .map_err(|e| {
                    WeatherError::parse(ENDPOINT, format!("bad dt_txt '{}': {e}", entry.dt_txt))
                })?;
            build_reading(ENDPOINT, entry.main, entry.wind, &entry.weather, Some(timestamp))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ForecastSeries::new(parsed.city.map(|c| c.name), readings))
}

fn build_reading(
    endpoint: &'static str,
    main: OwMain,
    wind: OwWind,
    weather: &[OwWeather],
    timestamp: Option<NaiveDateTime>,
) -> Result<WeatherReading, WeatherError> {
    let description = weather
        .first()
        .map(|w| w.description.clone())
        .ok_or_else(|| WeatherError::parse(endpoint, "empty `weather` array"))?;

    Ok(WeatherReading {
        temperature_c: main.temp,
        humidity_pct: main.humidity,
        pressure_hpa: main.pressure,
        wind_speed_mps: wind.speed,
        description,
        timestamp,
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENT: &str = r#"{
        "name": "Stockholm",
        "dt": 1714557600,
        "main": {"temp": 12.34, "feels_like": 11.0, "humidity": 71, "pressure": 1008},
        "wind": {"speed": 4.63, "deg": 240},
        "weather": [{"id": 500, "main": "Rain", "description": "light rain"}]
    }"#;

    #[test]
    fn parses_required_current_fields() {
        let reading = parse_current(CURRENT).expect("valid body");

        assert_eq!(reading.temperature_c, 12.34);
        assert_eq!(reading.humidity_pct, 71);
        assert_eq!(reading.pressure_hpa, 1008);
        assert_eq!(reading.wind_speed_mps, 4.63);
        assert_eq!(reading.description, "light rain");
        assert_eq!(
            reading.timestamp.map(|t| t.to_string()),
            Some("2024-05-01 10:00:00".to_string())
        );
    }

    #[test]
    fn missing_field_is_parse_failure() {
        let body = r#"{"main": {"temp": 1.0, "humidity": 5}, "wind": {"speed": 1.0}, "weather": []}"#;
        let err = parse_current(body).unwrap_err();
        assert!(matches!(err, WeatherError::Parse { .. }));
    }

    #[test]
    fn empty_weather_array_is_parse_failure() {
        let body = r#"{"main": {"temp": 1.0, "humidity": 5, "pressure": 990}, "wind": {"speed": 1.0}, "weather": []}"#;
        let err = parse_current(body).unwrap_err();
        assert!(err.to_string().contains("empty `weather` array"));
    }

    #[test]
    fn parses_forecast_entries_in_order() {
        let body = r#"{
            "city": {"name": "Oslo", "country": "NO"},
            "list": [
                {"dt_txt": "2024-05-01 12:00:00", "main": {"temp": 9.5, "humidity": 40, "pressure": 1020},
                 "wind": {"speed": 2.0}, "weather": [{"description": "few clouds"}]},
                {"dt_txt": "2024-05-01 15:00:00", "main": {"temp": 11.0, "humidity": 38, "pressure": 1019},
                 "wind": {"speed": 2.5}, "weather": [{"description": "clear sky"}]}
            ]
        }"#;

        let series = parse_forecast(body).expect("valid body");
        assert_eq!(series.city.as_deref(), Some("Oslo"));
        assert_eq!(series.len(), 2);
        assert_eq!(series.readings[1].description, "clear sky");
        assert_eq!(
            series.readings[0].timestamp.map(|t| t.to_string()),
            Some("2024-05-01 12:00:00".to_string())
        );
    }

    #[test]
    fn bad_dt_txt_is_parse_failure() {
        let body = r#"{"list": [{"dt_txt": "tomorrow", "main": {"temp": 1.0, "humidity": 5, "pressure": 990},
                       "wind": {"speed": 1.0}, "weather": [{"description": "mist"}]}]}"#;
        let err = parse_forecast(body).unwrap_err();
        assert!(err.to_string().contains("bad dt_txt 'tomorrow'"));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let client = OpenWeatherClient::new("KEY").with_base_url("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
