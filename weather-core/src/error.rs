pub use reqwest::StatusCode;
use thiserror::Error;

/// Coarse classification of a [`WeatherError`], used by front ends to decide
/// how a failure is shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The user supplied unusable input; no request was made.
    Input,
    /// The request could not be made or the server refused it.
    Transport,
    /// The server answered but the body did not have the expected shape.
    Parse,
    /// The data was well formed but too short for the requested summary.
    Data,
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("City name must not be empty")]
    EmptyCity,

    #[error(
        "No OpenWeather API key configured.\n\
         Hint: set OPENWEATHER_API_KEY or run `weather configure`."
    )]
    MissingApiKey,

    #[error("Failed to send request to OpenWeather ({endpoint})")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("OpenWeather {endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to parse OpenWeather {endpoint} JSON: {reason}")]
    Parse {
        endpoint: &'static str,
        reason: String,
    },

    #[error("Forecast has {available} entries, {required} needed")]
    InsufficientData { required: usize, available: usize },

    #[error("Sampling stride must be at least one entry")]
    InvalidStride,
}

impl WeatherError {
    pub fn kind(&self) -> FailureKind {
        match self {
            WeatherError::EmptyCity => FailureKind::Input,
            WeatherError::MissingApiKey
            | WeatherError::Transport { .. }
            | WeatherError::Status { .. } => FailureKind::Transport,
            WeatherError::Parse { .. } => FailureKind::Parse,
            WeatherError::InsufficientData { .. } | WeatherError::InvalidStride => {
                FailureKind::Data
            }
        }
    }

    pub fn is_input(&self) -> bool {
        self.kind() == FailureKind::Input
    }

    pub(crate) fn parse(endpoint: &'static str, reason: impl Into<String>) -> Self {
        WeatherError::Parse {
            endpoint,
            reason: reason.into(),
        }
    }
}
