use crate::{
    client::WeatherClient,
    error::WeatherError,
    model::{ForecastSeries, WeatherQuery, WeatherReading},
    recent::RecentCityTracker,
    summary::{self, DailySampling},
};

/// Everything the interactive views need for one looked-up city.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastView {
    pub city: String,
    pub current: WeatherReading,
    pub daily: Vec<WeatherReading>,
    pub series: ForecastSeries,
}

/// Owns the client and the recent-city history for one interactive run.
#[derive(Debug)]
pub struct ForecastSession<C> {
    client: C,
    tracker: RecentCityTracker,
    sampling: DailySampling,
}

impl<C: WeatherClient> ForecastSession<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            tracker: RecentCityTracker::new(),
            sampling: DailySampling::default(),
        }
    }

    pub fn with_sampling(mut self, sampling: DailySampling) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_tracker(mut self, tracker: RecentCityTracker) -> Self {
        self.tracker = tracker;
        self
    }

    /// Fetch and summarise the forecast for `input`.
    ///
    /// The city is recorded in the history only when every step succeeds.
    pub async fn lookup(&mut self, input: &str) -> Result<ForecastView, WeatherError> {
        let query = WeatherQuery::from_input(input);
        if query.city.is_empty() {
            return Err(WeatherError::EmptyCity);
        }

        let series = self.client.fetch_forecast(&query.city).await?;
        let current = summary::current(&series)?.clone();
        let daily = self.sampling.apply(&series)?;

        if self.tracker.record(&query.city) {
            tracing::debug!(city = %query.city, "added to recent cities");
        }

        Ok(ForecastView {
            city: query.city,
            current,
            daily,
            series,
        })
    }

    pub fn recent_cities(&self) -> &[String] {
        self.tracker.list()
    }

    pub fn sampling(&self) -> DailySampling {
        self.sampling
    }
}
