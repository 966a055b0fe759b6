use std::future::Future;

use crate::error::LocationError;
use crate::types::Coordinates;

/// Source of the user's current position.
pub trait LocationProvider {
    fn current_location(&self) -> impl Future<Output = Result<Coordinates, LocationError>> + Send;
}

/// Position taken from configuration; unavailable when none is configured.
#[derive(Debug, Clone, Default)]
pub struct FixedLocation {
    coords: Option<Coordinates>,
}

impl FixedLocation {
    pub fn new(coords: Option<Coordinates>) -> Self {
        Self { coords }
    }

    pub fn unavailable() -> Self {
        Self { coords: None }
    }
}

impl LocationProvider for FixedLocation {
    async fn current_location(&self) -> Result<Coordinates, LocationError> {
        match self.coords {
            Some(coords) => {
                tracing::debug!(lat = coords.lat, lon = coords.lon, "Using configured location");
                Ok(coords)
            }
            None => Err(LocationError::ServiceUnavailable),
        }
    }
}
