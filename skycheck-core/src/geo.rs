//! Geolocation as an injected capability.
//!
//! The coordinate flow needs a position from *somewhere* (a browser prompt,
//! a platform location service, an environment override). Modeling it as a
//! trait keeps the lookup flows testable with a deterministic stand-in.

use async_trait::async_trait;

use crate::model::Coordinates;

/// Geolocation failures. These surface directly to the user as an
/// immediate message; they are never routed through [`RequestState`].
///
/// [`RequestState`]: crate::state::RequestState
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    #[error("location access denied")]
    Denied,
    #[error("geolocation is not supported in this environment")]
    Unsupported,
}

/// Source of the device's current position.
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_coordinates(&self) -> Result<Coordinates, GeoError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedGeolocator(Coordinates);

    #[async_trait]
    impl Geolocator for FixedGeolocator {
        async fn current_coordinates(&self) -> Result<Coordinates, GeoError> {
            Ok(self.0)
        }
    }

    struct DeniedGeolocator;

    #[async_trait]
    impl Geolocator for DeniedGeolocator {
        async fn current_coordinates(&self) -> Result<Coordinates, GeoError> {
            Err(GeoError::Denied)
        }
    }

    #[tokio::test]
    async fn stand_in_geolocator_returns_fixed_coordinates() {
        let geo = FixedGeolocator(Coordinates {
            lat: -6.9175,
            lon: 107.6191,
        });

        let coords = geo.current_coordinates().await.expect("fixed position");
        assert_eq!(coords.lat, -6.9175);
        assert_eq!(coords.lon, 107.6191);
    }

    #[tokio::test]
    async fn denied_geolocator_surfaces_denied() {
        let err = DeniedGeolocator.current_coordinates().await.unwrap_err();
        assert!(matches!(err, GeoError::Denied));
        assert_eq!(err.to_string(), "location access denied");
    }
}
