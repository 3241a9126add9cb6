//! Core library for the `skycheck` weather lookup.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The HTTP client for the current-weather and forecast endpoints
//! - The request-state coordinator driving the two lookup flows
//! - The per-day forecast reducer
//! - The injectable geolocation capability
//!
//! It is used by `skycheck-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod daily;
pub mod geo;
pub mod model;
pub mod state;

pub use client::{WeatherClient, WeatherError};
pub use config::{ClientSettings, Config};
pub use daily::select_daily_forecasts;
pub use geo::{GeoError, Geolocator};
pub use model::{
    Condition, Coordinates, CurrentWeather, Forecast, ForecastCondition, ForecastEntry, IconSize,
    icon_url,
};
pub use state::{
    CITY_LOOKUP_ERROR, COORDS_LOOKUP_ERROR, RequestState, WeatherCoordinator,
};
