//! Menu-driven terminal front end for forecasts and recent cities.

use anyhow::Result;
use inquire::{InquireError, Select, Text};
use std::{fmt, fs, io, path::Path};
use weather_core::{ForecastSession, WeatherClient};

use crate::{chart, dashboard::Dashboard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Fetch,
    Recent,
    Clear,
    Quit,
}

impl Action {
    fn menu(has_recent: bool) -> Vec<Action> {
        let mut items = vec![Action::Fetch];
        if has_recent {
            items.push(Action::Recent);
        }
        items.extend([Action::Clear, Action::Quit]);
        items
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Fetch => "Fetch weather",
            Action::Recent => "Recent cities",
            Action::Clear => "Clear",
            Action::Quit => "Quit",
        })
    }
}

/// `Ok(None)` when the user backs out with Esc or Ctrl-C.
fn cancelled_as_none<T>(res: Result<T, InquireError>) -> Result<Option<T>> {
    match res {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub async fn run<C: WeatherClient>(
    session: &mut ForecastSession<C>,
    chart_path: &Path,
) -> Result<()> {
    let mut dashboard = Dashboard::default();

    loop {
        let menu = Action::menu(!session.recent_cities().is_empty());
        let Some(action) = cancelled_as_none(Select::new("What next?", menu).prompt())? else {
            break;
        };

        match action {
            Action::Fetch => {
                let Some(input) = cancelled_as_none(Text::new("City:").prompt())? else {
                    continue;
                };
                lookup(session, &mut dashboard, &input, chart_path).await;
            }
            Action::Recent => {
                let cities = session.recent_cities().to_vec();
                let Some(city) = cancelled_as_none(Select::new("Recent cities:", cities).prompt())?
                else {
                    continue;
                };
                lookup(session, &mut dashboard, &city, chart_path).await;
            }
            Action::Clear => clear(&mut dashboard, chart_path),
            Action::Quit => break,
        }

        let text = dashboard.render();
        if !text.is_empty() {
            println!("\n{text}\n");
        }
    }

    Ok(())
}

async fn lookup<C: WeatherClient>(
    session: &mut ForecastSession<C>,
    dashboard: &mut Dashboard,
    input: &str,
    chart_path: &Path,
) {
    let outcome = session.lookup(input).await;
    if let Err(err) = &outcome {
        tracing::warn!(error = %err, "forecast lookup failed");
    }
    dashboard.apply(&outcome);

    let Ok(view) = outcome else {
        remove_chart(chart_path);
        return;
    };

    let title = format!("Temperature forecast: {}", view.city);
    match chart::write_svg(chart_path, &title, &view.series.temperature_points()) {
        Ok(()) => dashboard.set_chart(chart_path),
        Err(err) => {
            tracing::warn!(error = %err, "could not write temperature chart");
            remove_chart(chart_path);
        }
    }
}

fn clear(dashboard: &mut Dashboard, chart_path: &Path) {
    dashboard.clear();
    remove_chart(chart_path);
}

/// Delete a previously written chart so it cannot outlive the views it belongs to.
fn remove_chart(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => tracing::debug!(path = %path.display(), "removed temperature chart"),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "could not remove temperature chart")
        }
    }
}
