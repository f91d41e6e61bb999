use std::path::{Path, PathBuf};

use weather_core::{ForecastView, WeatherError};

use crate::render;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    Showing(String),
    Warning(&'static str),
    Error(&'static str),
}

/// What the interactive flow currently displays.
///
/// A failed lookup wipes every view so stale data is never shown next to an error.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub current_text: String,
    pub forecast_text: String,
    pub chart_path: Option<PathBuf>,
    pub status: Status,
}

impl Dashboard {
    pub fn apply(&mut self, outcome: &Result<ForecastView, WeatherError>) {
        match outcome {
            Ok(view) => {
                self.current_text = render::current_block(&view.city, &view.current);
                self.forecast_text = render::forecast_block(&view.daily);
                self.chart_path = None;
                self.status = Status::Showing(view.city.clone());
            }
            Err(err) => {
                self.clear();
                let message = render::failure_message(err);
                self.status = if err.is_input() {
                    Status::Warning(message)
                } else {
                    Status::Error(message)
                };
            }
        }
    }

    pub fn set_chart(&mut self, path: &Path) {
        self.chart_path = Some(path.to_path_buf());
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn render(&self) -> String {
        let mut sections = Vec::new();

        match &self.status {
            Status::Idle => {}
            Status::Showing(city) => sections.push(format!("== {city} ==")),
            Status::Warning(msg) => sections.push(format!("Warning: {msg}")),
            Status::Error(msg) => sections.push(format!("Error: {msg}")),
        }

        if !self.current_text.is_empty() {
            sections.push(self.current_text.clone());
        }
        if !self.forecast_text.is_empty() {
            sections.push(self.forecast_text.clone());
        }
        if let Some(path) = &self.chart_path {
            sections.push(format!("Temperature chart: {}", path.display()));
        }

        sections.join("\n\n")
    }
}
