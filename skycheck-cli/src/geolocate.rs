//! Geolocation for a headless terminal: coordinates come from the
//! environment (`SKYCHECK_LAT` / `SKYCHECK_LON`). This is the workstation
//! stand-in for a browser's position prompt, plugged in behind the
//! `Geolocator` seam so the lookup flow itself stays source-agnostic.

use std::env;

use async_trait::async_trait;
use skycheck_core::{Coordinates, GeoError, Geolocator};

pub const ENV_LAT: &str = "SKYCHECK_LAT";
pub const ENV_LON: &str = "SKYCHECK_LON";

#[derive(Debug, Default)]
pub struct EnvGeolocator;

#[async_trait]
impl Geolocator for EnvGeolocator {
    async fn current_coordinates(&self) -> Result<Coordinates, GeoError> {
        from_values(env::var(ENV_LAT).ok(), env::var(ENV_LON).ok())
    }
}

fn from_values(lat: Option<String>, lon: Option<String>) -> Result<Coordinates, GeoError> {
    let (Some(lat), Some(lon)) = (lat, lon) else {
        return Err(GeoError::Unsupported);
    };

    let lat = lat.trim().parse().map_err(|_| GeoError::Unsupported)?;
    let lon = lon.trim().parse().map_err(|_| GeoError::Unsupported)?;

    Ok(Coordinates { lat, lon })
}
