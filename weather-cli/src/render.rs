//! Human-readable text for readings and forecasts.

use weather_core::{WeatherError, WeatherReading};

/// Printed by the console flow for any transport, parse or data failure.
pub const CONSOLE_ERROR: &str = "Error in the HTTP request";

/// Shown by the interactive flow for any transport, parse or data failure.
pub const LOOKUP_ERROR: &str =
    "Failed to retrieve weather data. Please check the city name and try again.";

pub const INPUT_WARNING: &str = "Please enter a city name.";

pub fn console_lines(city: &str, reading: &WeatherReading) -> Vec<String> {
    vec![
        format!("City: {city}"),
        format!("Temperature: {}°C", reading.temperature_c),
        format!("Humidity: {}%", reading.humidity_pct),
        format!("Pressure: {} hPa", reading.pressure_hpa),
        format!("Wind Speed: {} m/s", reading.wind_speed_mps),
        format!("Weather Description: {}", reading.description),
    ]
}

/// Lines the console flow prints for the outcome of a current-weather lookup.
pub fn console_report(city: &str, outcome: &Result<WeatherReading, WeatherError>) -> Vec<String> {
    match outcome {
        Ok(reading) => console_lines(city, reading),
        Err(err) if err.is_input() => vec![INPUT_WARNING.to_string()],
        Err(_) => vec![CONSOLE_ERROR.to_string()],
    }
}

/// User-facing message for a failed interactive lookup.
pub fn failure_message(err: &WeatherError) -> &'static str {
    if err.is_input() {
        INPUT_WARNING
    } else {
        LOOKUP_ERROR
    }
}

pub fn current_block(city: &str, reading: &WeatherReading) -> String {
    format!(
        "Current weather in {city}:\n\
         Temperature: {}°C\n\
         Humidity: {}%\n\
         Pressure: {} hPa\n\
         Wind Speed: {} m/s\n\
         Description: {}",
        reading.temperature_c,
        reading.humidity_pct,
        reading.pressure_hpa,
        reading.wind_speed_mps,
        reading.description,
    )
}

pub fn forecast_block(samples: &[WeatherReading]) -> String {
    let mut out = format!("{}-day forecast:", samples.len());

    for (i, reading) in samples.iter().enumerate() {
        let when = reading
            .timestamp
            .map(|ts| ts.format("%a %d %b %H:%M").to_string())
            .unwrap_or_else(|| format!("Day {}", i + 1));

        out.push_str(&format!(
            "\n{when}: {}°C, {}",
            reading.temperature_c, reading.description
        ));
    }

    out
}
