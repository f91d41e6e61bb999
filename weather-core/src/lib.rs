//! Core library for the `weather` tools.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap client
//! - The recent-city history and forecast summarising
//! - Shared domain models (queries, readings, forecast series)
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod recent;
pub mod session;
pub mod summary;

pub use client::{OpenWeatherClient, WeatherClient};
pub use config::Config;
pub use error::{FailureKind, StatusCode, WeatherError};
pub use model::{ForecastSeries, WeatherQuery, WeatherReading};
pub use recent::{RECENT_CITY_CAPACITY, RecentCityTracker};
pub use session::{ForecastSession, ForecastView};
pub use summary::DailySampling;
