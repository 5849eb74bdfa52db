//! Weather Provider Port
//!
//! Defines the interface for fetching current conditions at coordinates.

use crate::domain::entities::WeatherObservation;
use crate::domain::errors::LookupError;
use async_trait::async_trait;

/// Current-weather lookup for a coordinate pair.
///
/// This is an outbound port. Coordinates passed in already satisfy the
/// range invariant of `GeoLocation`. Errors are tagged `Stage::Weather`.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Short name of the backing service, for logs and the health endpoint.
    fn name(&self) -> &'static str;

    /// Fetch conditions. Issues exactly one outbound call.
    async fn resolve(&self, latitude: f64, longitude: f64)
        -> Result<WeatherObservation, LookupError>;
}
