//! Fixed-width text rendering of a [`WeatherReport`].

use std::fmt::Write;

use crate::model::WeatherReport;

/// Column at which values start.
pub const LABEL_WIDTH: usize = 18;

/// Render `report` as labeled lines, in a fixed order:
/// temperature, feels like, description (if any), max, min, humidity, pressure.
pub fn format(report: &WeatherReport) -> String {
    let mut out = String::new();

    line(&mut out, "Temperature:", format_args!("{:.2} K", report.temperature));
    line(&mut out, "Feels like:", format_args!("{:.2} K", report.feels_like));
    if let Some(description) = &report.description {
        line(&mut out, "Description:", format_args!("{description}"));
    }
    line(&mut out, "Max temperature:", format_args!("{:.2} K", report.temp_max));
    line(&mut out, "Min temperature:", format_args!("{:.2} K", report.temp_min));
    line(&mut out, "Humidity:", format_args!("{}%", report.humidity));
    line(&mut out, "Pressure:", format_args!("{} hPa", report.pressure));

    out
}

fn line(out: &mut String, label: &str, value: std::fmt::Arguments<'_>) {
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{label:<LABEL_WIDTH$}{value}");
}
