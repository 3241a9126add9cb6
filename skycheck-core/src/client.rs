//! HTTP client for the upstream weather API.
//!
//! Wraps `reqwest` with typed response mapping. The three operations are
//! stateless and make exactly one attempt each; every failure propagates
//! immediately to the caller, which is the state coordinator in practice.

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::ClientSettings;
use crate::model::{
    Condition, Coordinates, CurrentWeather, Forecast, ForecastCondition, ForecastEntry,
};

/// Failure taxonomy for a single upstream request.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("location not found")]
    NotFound,
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("upstream returned status {status}: {body}")]
    Upstream { status: StatusCode, body: String },
    #[error("unexpected response shape: {0}")]
    Parse(String),
}

/// Client for the current-weather and 5-day-forecast endpoints.
///
/// Cheap to clone (`reqwest::Client` is internally reference-counted). No
/// request timeout is configured here; the transport's own defaults apply,
/// so a hung upstream hangs the caller too.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    pub fn new(settings: ClientSettings) -> Self {
        Self {
            http: Client::new(),
            api_key: settings.api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Current conditions looked up by city name.
    pub async fn current_by_name(&self, city: &str) -> Result<CurrentWeather, WeatherError> {
        let body = self
            .request("weather", &[("q", city)])
            .await?;
        parse_current(&body)
    }

    /// Current conditions looked up by coordinates. The response carries the
    /// reverse-geocoded location name, which the coordinate flow feeds into
    /// the forecast lookup.
    pub async fn current_by_coords(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<CurrentWeather, WeatherError> {
        let body = self
            .request(
                "weather",
                &[("lat", &lat.to_string()), ("lon", &lon.to_string())],
            )
            .await?;
        parse_current(&body)
    }

    /// 5-day/3-hour forecast by city name. The forecast endpoint only
    /// accepts a name, never coordinates.
    pub async fn forecast(&self, city: &str) -> Result<Forecast, WeatherError> {
        let body = self.request("forecast", &[("q", city)]).await?;
        parse_forecast(&body)
    }

    async fn request(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<String, WeatherError> {
        let url = format!("{}/{endpoint}", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("units", "metric"), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if status == StatusCode::NOT_FOUND {
            tracing::debug!(endpoint, "upstream reported location not found");
            return Err(WeatherError::NotFound);
        }
        if !status.is_success() {
            return Err(WeatherError::Upstream {
                status,
                body: truncate_body(&body),
            });
        }

        Ok(body)
    }
}

// Raw upstream shapes, private to this module. Field names are fixed by the
// provider and mapped field-for-field into the domain models below.

#[derive(Debug, Deserialize)]
struct RawMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct RawCondition {
    id: i64,
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct RawWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct RawSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct RawCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct RawCurrentResponse {
    name: String,
    main: RawMain,
    weather: Vec<RawCondition>,
    wind: RawWind,
    sys: RawSys,
    coord: RawCoord,
}

#[derive(Debug, Deserialize)]
struct RawForecastMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct RawForecastCondition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct RawForecastEntry {
    dt: i64,
    main: RawForecastMain,
    weather: Vec<RawForecastCondition>,
    dt_txt: String,
}

#[derive(Debug, Deserialize)]
struct RawCity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawForecastResponse {
    list: Vec<RawForecastEntry>,
    city: RawCity,
}

fn parse_current(body: &str) -> Result<CurrentWeather, WeatherError> {
    let raw: RawCurrentResponse = serde_json::from_str(body)
        .map_err(|e| WeatherError::Parse(format!("current weather: {e}")))?;

    if raw.weather.is_empty() {
        return Err(WeatherError::Parse(
            "current weather: condition list is empty".to_string(),
        ));
    }

    Ok(CurrentWeather {
        location_name: raw.name,
        country_code: raw.sys.country,
        temperature_c: raw.main.temp,
        feels_like_c: raw.main.feels_like,
        humidity_pct: raw.main.humidity,
        pressure_hpa: raw.main.pressure,
        wind_speed_mps: raw.wind.speed,
        conditions: raw
            .weather
            .into_iter()
            .map(|w| Condition {
                id: w.id,
                main: w.main,
                description: w.description,
                icon: w.icon,
            })
            .collect(),
        coordinates: Coordinates {
            lat: raw.coord.lat,
            lon: raw.coord.lon,
        },
    })
}

fn parse_forecast(body: &str) -> Result<Forecast, WeatherError> {
    let raw: RawForecastResponse =
        serde_json::from_str(body).map_err(|e| WeatherError::Parse(format!("forecast: {e}")))?;

    Ok(Forecast {
        location_name: raw.city.name,
        entries: raw
            .list
            .into_iter()
            .map(|e| ForecastEntry {
                timestamp: e.dt,
                timestamp_text: e.dt_txt,
                temperature_c: e.main.temp,
                humidity_pct: e.main.humidity,
                conditions: e
                    .weather
                    .into_iter()
                    .map(|w| ForecastCondition {
                        description: w.description,
                        icon: w.icon,
                    })
                    .collect(),
            })
            .collect(),
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Cut on a char boundary; a raw byte cut can land inside a multi-byte
    // character and panic.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_current_maps_all_fields() {
        let body = r#"{
            "name": "Jakarta",
            "main": {"temp": 31.2, "feels_like": 35.8, "humidity": 70, "pressure": 1009},
            "weather": [{"id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d"}],
            "wind": {"speed": 3.6},
            "sys": {"country": "ID"},
            "coord": {"lat": -6.2146, "lon": 106.8451}
        }"#;

        let parsed = parse_current(body).expect("valid body");
        assert_eq!(parsed.location_name, "Jakarta");
        assert_eq!(parsed.country_code, "ID");
        assert_eq!(parsed.temperature_c, 31.2);
        assert_eq!(parsed.feels_like_c, 35.8);
        assert_eq!(parsed.humidity_pct, 70);
        assert_eq!(parsed.pressure_hpa, 1009);
        assert_eq!(parsed.wind_speed_mps, 3.6);
        assert_eq!(parsed.conditions.len(), 1);
        assert_eq!(parsed.conditions[0].id, 802);
        assert_eq!(parsed.conditions[0].description, "scattered clouds");
        assert_eq!(parsed.coordinates.lat, -6.2146);
        assert_eq!(parsed.coordinates.lon, 106.8451);
    }

    #[test]
    fn parse_current_rejects_empty_condition_list() {
        let body = r#"{
            "name": "Jakarta",
            "main": {"temp": 31.2, "feels_like": 35.8, "humidity": 70, "pressure": 1009},
            "weather": [],
            "wind": {"speed": 3.6},
            "sys": {"country": "ID"},
            "coord": {"lat": -6.2146, "lon": 106.8451}
        }"#;

        let err = parse_current(body).unwrap_err();
        assert!(matches!(err, WeatherError::Parse(_)), "got: {err:?}");
    }

    #[test]
    fn parse_forecast_maps_entries_and_city() {
        let body = r#"{
            "list": [{
                "dt": 1756684800,
                "main": {"temp": 27.4, "humidity": 80},
                "weather": [{"description": "light rain", "icon": "10d"}],
                "dt_txt": "2025-09-01 00:00:00"
            }],
            "city": {"name": "Bandung"}
        }"#;

        let parsed = parse_forecast(body).expect("valid body");
        assert_eq!(parsed.location_name, "Bandung");
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.entries[0].timestamp, 1756684800);
        assert_eq!(parsed.entries[0].timestamp_text, "2025-09-01 00:00:00");
        assert_eq!(parsed.entries[0].conditions[0].icon, "10d");
    }

    #[test]
    fn parse_errors_name_the_failing_payload() {
        let err = parse_current("{not json").unwrap_err();
        assert!(err.to_string().contains("current weather"));

        let err = parse_forecast("{not json").unwrap_err();
        assert!(err.to_string().contains("forecast"));
    }

    #[test]
    fn truncate_body_caps_long_bodies() {
        let long = "x".repeat(500);
        let short = truncate_body(&long);
        assert_eq!(short.len(), 203); // 200 chars + "..."
        assert!(short.ends_with("..."));
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_body_cuts_on_char_boundaries() {
        // 301 bytes; byte 200 falls inside a two-byte 'é'.
        let body = format!("a{}", "é".repeat(150));

        let short = truncate_body(&body);
        assert!(short.ends_with("..."));
        assert_eq!(&short[..short.len() - 3], &body[..199]);
    }
}
