//! Temperature-over-time plot for a forecast series.

use anyhow::{Context, Result, bail};
use chrono::{Duration, NaiveDateTime};
use plotters::coord::types::RangedDateTime;
use plotters::prelude::*;
use std::{fs, path::Path};

const SIZE: (u32, u32) = (900, 480);

/// Render `points` as an SVG line chart and return the document.
pub fn render_svg(title: &str, points: &[(NaiveDateTime, f64)]) -> Result<String> {
    let Some(&(first, _)) = points.first() else {
        bail!("No timestamped readings to plot");
    };

    let (min_t, max_t) = points
        .iter()
        .fold((first, first), |(lo, hi), (t, _)| (lo.min(*t), hi.max(*t)));
    // A single reading still needs a non-empty time axis.
    let max_t = if max_t > min_t {
        max_t
    } else {
        min_t + Duration::hours(3)
    };

    let (min_temp, max_temp) = points.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), (_, temp)| (lo.min(*temp), hi.max(*temp)),
    );
    let padding = if max_temp - min_temp > 1e-6 {
        (max_temp - min_temp) * 0.1
    } else {
        1.0
    };

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 20))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(
                RangedDateTime::from(min_t..max_t),
                (min_temp - padding)..(max_temp + padding),
            )?;

        chart
            .configure_mesh()
            .x_desc("Time (UTC)")
            .y_desc("Temperature (°C)")
            .x_label_formatter(&|t: &NaiveDateTime| t.format("%d %b %H:%M").to_string())
            .draw()?;

        chart.draw_series(LineSeries::new(points.iter().copied(), RED.stroke_width(2)))?;

        root.present()?;
    }

    Ok(svg)
}

pub fn write_svg(path: &Path, title: &str, points: &[(NaiveDateTime, f64)]) -> Result<()> {
    let svg = render_svg(title, points)?;
    fs::write(path, svg).with_context(|| format!("Failed to write chart: {}", path.display()))?;
    tracing::debug!(path = %path.display(), points = points.len(), "wrote temperature chart");
    Ok(())
}
