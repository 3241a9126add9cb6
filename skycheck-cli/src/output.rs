//! Human-friendly rendering of lookup results.

use chrono::NaiveDateTime;
use skycheck_core::{CurrentWeather, Forecast, ForecastEntry, IconSize, icon_url, select_daily_forecasts};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn print_report(weather: &CurrentWeather, forecast: &Forecast) {
    println!("{}", format_current(weather));
    println!();
    println!("5-day forecast for {}:", forecast.location_name);
    for entry in select_daily_forecasts(forecast) {
        println!("{}", format_daily_line(entry));
    }
}

fn format_current(weather: &CurrentWeather) -> String {
    // Parse-time invariant guarantees at least one condition.
    let condition = &weather.conditions[0];

    format!(
        "{}, {} ({:.4}, {:.4})\n  {}\n  temp {:.1}°C (feels like {:.1}°C)\n  humidity {}%  pressure {} hPa  wind {:.1} m/s\n  {}",
        weather.location_name,
        weather.country_code,
        weather.coordinates.lat,
        weather.coordinates.lon,
        condition.description,
        weather.temperature_c,
        weather.feels_like_c,
        weather.humidity_pct,
        weather.pressure_hpa,
        weather.wind_speed_mps,
        icon_url(&condition.icon, IconSize::FourX),
    )
}

fn format_daily_line(entry: &ForecastEntry) -> String {
    let day = day_label(&entry.timestamp_text);
    let (description, icon) = entry
        .conditions
        .first()
        .map(|c| (c.description.as_str(), c.icon.as_str()))
        .unwrap_or(("-", ""));

    let icon_part = if icon.is_empty() {
        String::new()
    } else {
        format!("  {}", icon_url(icon, IconSize::TwoX))
    };

    format!(
        "  {day}  {:>5.1}°C  {:>3}%  {description}{icon_part}",
        entry.temperature_c, entry.humidity_pct,
    )
}

/// "2025-09-01 00:00:00" -> "Mon 01 Sep". Falls back to the raw date
/// prefix if the upstream ever changes its timestamp format.
fn day_label(timestamp_text: &str) -> String {
    NaiveDateTime::parse_from_str(timestamp_text, TIMESTAMP_FORMAT)
        .map(|dt| dt.format("%a %d %b").to_string())
        .unwrap_or_else(|_| {
            timestamp_text
                .split(' ')
                .next()
                .unwrap_or(timestamp_text)
                .to_string()
        })
}
