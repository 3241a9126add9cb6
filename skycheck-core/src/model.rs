use serde::{Deserialize, Serialize};

/// Geographic point, degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One weather condition as reported for the current observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// Current conditions for one location. Replaced wholesale on every
/// successful fetch, never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub location_name: String,
    pub country_code: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_mps: f64,
    /// Always at least one element; the client rejects responses where
    /// the upstream sends an empty condition list.
    pub conditions: Vec<Condition>,
    pub coordinates: Coordinates,
}

/// Condition detail carried by forecast entries (the forecast feed only
/// exposes description and icon).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastCondition {
    pub description: String,
    pub icon: String,
}

/// One 3-hourly forecast slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: i64,
    /// Upstream-formatted "YYYY-MM-DD HH:MM:SS"; the date prefix is the
    /// grouping key for day-level deduplication.
    pub timestamp_text: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub conditions: Vec<ForecastCondition>,
}

/// Full 5-day/3-hour forecast feed, entries in ascending time order
/// (upstream contract, not re-verified here).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub entries: Vec<ForecastEntry>,
    pub location_name: String,
}

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Icon image sizes offered by the upstream image host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSize {
    /// Forecast tiles.
    TwoX,
    /// Current-weather hero image.
    FourX,
}

impl IconSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconSize::TwoX => "2x",
            IconSize::FourX => "4x",
        }
    }
}

/// Render the upstream icon URL for a condition's icon code.
pub fn icon_url(icon_code: &str, size: IconSize) -> String {
    format!("{ICON_BASE_URL}/{icon_code}@{}.png", size.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_url_uses_four_x_for_current_weather() {
        assert_eq!(
            icon_url("10d", IconSize::FourX),
            "https://openweathermap.org/img/wn/10d@4x.png"
        );
    }

    #[test]
    fn icon_url_uses_two_x_for_forecast_tiles() {
        assert_eq!(
            icon_url("01n", IconSize::TwoX),
            "https://openweathermap.org/img/wn/01n@2x.png"
        );
    }
}
