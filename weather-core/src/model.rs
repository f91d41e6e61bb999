use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub city: String,
}

impl WeatherQuery {
    /// Build a query from raw user input, trimming surrounding whitespace.
    pub fn from_input(input: &str) -> Self {
        Self {
            city: input.trim().to_string(),
        }
    }
}

/// One observation or forecast slot, in metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_mps: f64,
    pub description: String,
    /// UTC time the reading applies to, when the provider reports one.
    pub timestamp: Option<NaiveDateTime>,
}

/// Chronological forecast readings, 3 hours apart as delivered by the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub city: Option<String>,
    pub readings: Vec<WeatherReading>,
}

impl ForecastSeries {
    pub fn new(city: Option<String>, readings: Vec<WeatherReading>) -> Self {
        Self { city, readings }
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WeatherReading> {
        self.readings.get(index)
    }

    /// `(timestamp, temperature)` pairs for every reading that carries a timestamp.
    pub fn temperature_points(&self) -> Vec<(NaiveDateTime, f64)> {
        self.readings
            .iter()
            .filter_map(|r| r.timestamp.map(|ts| (ts, r.temperature_c)))
            .collect()
    }
}
