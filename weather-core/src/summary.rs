//! Reduce a 3-hourly forecast to the readings shown to the user.
//!
//! Daily samples are taken at a fixed stride from the start of the series, so
//! the time of day of each sample is whatever the provider put at that offset.
//! No averaging or calendar alignment is done.

use crate::{
    error::WeatherError,
    model::{ForecastSeries, WeatherReading},
};

/// How many days to sample and how many entries apart the samples are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySampling {
    pub days: usize,
    pub stride_entries: usize,
}

impl Default for DailySampling {
    /// Five days out of the provider's 3-hour series (8 entries per day).
    fn default() -> Self {
        Self {
            days: 5,
            stride_entries: 8,
        }
    }
}

impl DailySampling {
    /// Entries a series must hold before it can be sampled.
    pub fn required_entries(&self) -> usize {
        self.days.saturating_mul(self.stride_entries)
    }

    pub fn apply(&self, series: &ForecastSeries) -> Result<Vec<WeatherReading>, WeatherError> {
        daily_samples(series, self.days, self.stride_entries)
    }
}

/// The first reading of the series, taken as "now".
pub fn current(series: &ForecastSeries) -> Result<&WeatherReading, WeatherError> {
    series.get(0).ok_or(WeatherError::InsufficientData {
        required: 1,
        available: 0,
    })
}

/// One reading per day: `series[0]`, `series[stride]`, `series[2 * stride]`, ...
pub fn daily_samples(
    series: &ForecastSeries,
    days: usize,
    stride_entries: usize,
) -> Result<Vec<WeatherReading>, WeatherError> {
    if stride_entries == 0 {
        return Err(WeatherError::InvalidStride);
    }

    let required = days.saturating_mul(stride_entries);
    if series.len() < required {
        return Err(WeatherError::InsufficientData {
            required,
            available: series.len(),
        });
    }

    Ok(series
        .readings
        .iter()
        .step_by(stride_entries)
        .take(days)
        .cloned()
        .collect())
}
