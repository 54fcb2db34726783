//! Device sensor collaborators: geolocation and compass orientation.
//!
//! Both are modeled as traits so the app core never talks to a platform API
//! directly. The default providers here are the terminal-friendly ones: a
//! location read from configuration and a null compass (static display).

use std::sync::mpsc;
use std::time::Duration;

use thiserror::Error;

/// Timeout contract for a single position request.
pub const LOCATION_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Classified geolocation failures, surfaced to the user as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeoError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    Unavailable,
    #[error("location request timed out")]
    Timeout,
}

/// Single current-position request; no cached fix reuse.
pub trait LocationProvider {
    fn current_position(&self) -> Result<Coordinates, GeoError>;
}

/// Location taken from the configured latitude/longitude.
pub struct ConfigLocation {
    coords: Option<Coordinates>,
}

impl ConfigLocation {
    pub fn new(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        let coords = match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        };
        Self { coords }
    }
}

impl LocationProvider for ConfigLocation {
    fn current_position(&self) -> Result<Coordinates, GeoError> {
        self.coords.ok_or(GeoError::Unavailable)
    }
}

/// Continuous compass-heading events; `None` when the device has no
/// orientation sensor, in which case the compass renders statically.
pub trait OrientationProvider {
    fn headings(&self) -> Option<mpsc::Receiver<f64>>;
}

/// No orientation sensor available.
pub struct NullOrientation;

impl OrientationProvider for NullOrientation {
    fn headings(&self) -> Option<mpsc::Receiver<f64>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_location_yields_configured_fix() {
        let provider = ConfigLocation::new(Some(-6.2), Some(106.8));
        let fix = provider.current_position().unwrap();
        assert_eq!(fix.latitude, -6.2);
        assert_eq!(fix.longitude, 106.8);
    }

    #[test]
    fn missing_config_is_unavailable() {
        let provider = ConfigLocation::new(None, Some(106.8));
        assert_eq!(provider.current_position(), Err(GeoError::Unavailable));
    }

    #[test]
    fn null_orientation_has_no_stream() {
        assert!(NullOrientation.headings().is_none());
    }
}
