//! Collapse the 3-hourly forecast feed into one entry per calendar day.

use std::collections::HashSet;

use crate::model::{Forecast, ForecastEntry};

/// One representative entry per distinct calendar date, in first-seen order.
///
/// The grouping key is the date prefix of `timestamp_text` (everything
/// before the first space). Entries arrive sorted ascending by time, so
/// first-seen means earliest-of-day and the output dates are strictly
/// increasing. This deliberately picks the earliest slot rather than a
/// daily min/max/average.
pub fn select_daily_forecasts(forecast: &Forecast) -> Vec<&ForecastEntry> {
    let mut seen = HashSet::new();
    forecast
        .entries
        .iter()
        .filter(|entry| seen.insert(date_prefix(&entry.timestamp_text)))
        .collect()
}

fn date_prefix(timestamp_text: &str) -> &str {
    timestamp_text
        .split(' ')
        .next()
        .unwrap_or(timestamp_text)
}
