//! Request state coordination for the two lookup flows.
//!
//! Mirrors the lifecycle the UI observes: `loading` flips on at dispatch and
//! off at settlement, and a fetch either commits both the current weather
//! and the forecast or commits neither.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::client::{WeatherClient, WeatherError};
use crate::model::{CurrentWeather, Forecast};

/// Fixed user-facing message for a failed name-based lookup. Whatever the
/// underlying failure was (not found, network, parse), it collapses to this.
pub const CITY_LOOKUP_ERROR: &str = "City not found or something went wrong";

/// Fixed user-facing message for a failed coordinate-based lookup.
pub const COORDS_LOOKUP_ERROR: &str = "Unable to fetch weather for your location";

/// Observable state of the most recently settled (or in-flight) lookup.
///
/// Invariants:
/// - `loading` is true only strictly between dispatch and settlement.
/// - `error` and the data fields are mutually exclusive: a failed lookup
///   clears both data fields, a successful one clears `error`.
#[derive(Debug, Clone, Default)]
pub struct RequestState {
    pub weather: Option<CurrentWeather>,
    pub forecast: Option<Forecast>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Drives the weather client and owns the shared [`RequestState`].
///
/// Clonable so overlapping invocations are possible; no cancellation or
/// sequencing is performed. When fetches overlap, each one commits at its
/// own settlement, so the last to settle wins even if it was dispatched
/// first. Callers that need ordering must serialize their calls.
#[derive(Debug, Clone)]
pub struct WeatherCoordinator {
    client: WeatherClient,
    state: Arc<Mutex<RequestState>>,
}

impl WeatherCoordinator {
    pub fn new(client: WeatherClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(RequestState::default())),
        }
    }

    /// Snapshot of the current state. The lock is never held across an
    /// await, so this cannot observe a half-committed result.
    pub fn state(&self) -> RequestState {
        self.state.lock().clone()
    }

    /// Name-based lookup: current weather and forecast fetched concurrently,
    /// both committed or neither. Rejecting empty/whitespace-only input is
    /// the caller's job, not this component's.
    pub async fn fetch_weather(&self, city: &str) {
        self.begin();

        let (weather, forecast) =
            tokio::join!(self.client.current_by_name(city), self.client.forecast(city));

        match (weather, forecast) {
            (Ok(weather), Ok(forecast)) => self.settle_ok(weather, forecast),
            (weather, forecast) => {
                log_discarded(city, weather.err(), forecast.err());
                self.settle_err(CITY_LOOKUP_ERROR);
            }
        }
    }

    /// Coordinate-based lookup: current weather first, then the forecast
    /// for whatever location name the upstream resolved those coordinates
    /// to. If the upstream resolves the name differently between the two
    /// calls, the mismatch is accepted as-is.
    pub async fn fetch_weather_by_coords(&self, lat: f64, lon: f64) {
        self.begin();

        let result = self.current_then_forecast(lat, lon).await;

        match result {
            Ok((weather, forecast)) => self.settle_ok(weather, forecast),
            Err(err) => {
                tracing::warn!(lat, lon, error = %err, "coordinate lookup failed");
                self.settle_err(COORDS_LOOKUP_ERROR);
            }
        }
    }

    async fn current_then_forecast(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<(CurrentWeather, Forecast), WeatherError> {
        let weather = self.client.current_by_coords(lat, lon).await?;
        let forecast = self.client.forecast(&weather.location_name).await?;
        Ok((weather, forecast))
    }

    fn begin(&self) {
        let mut state = self.state.lock();
        state.loading = true;
        state.error = None;
    }

    fn settle_ok(&self, weather: CurrentWeather, forecast: Forecast) {
        let mut state = self.state.lock();
        state.weather = Some(weather);
        state.forecast = Some(forecast);
        state.error = None;
        state.loading = false;
    }

    /// Total failure: discard both data fields, even if one of the two
    /// calls succeeded. There is no partial-success state.
    fn settle_err(&self, message: &str) {
        let mut state = self.state.lock();
        state.weather = None;
        state.forecast = None;
        state.error = Some(message.to_string());
        state.loading = false;
    }
}

fn log_discarded(city: &str, weather: Option<WeatherError>, forecast: Option<WeatherError>) {
    if let Some(err) = weather {
        tracing::warn!(city, error = %err, "current weather fetch failed");
    }
    if let Some(err) = forecast {
        tracing::warn!(city, error = %err, "forecast fetch failed");
    }
}
