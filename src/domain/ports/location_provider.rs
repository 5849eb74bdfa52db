//! Location Provider Port
//!
//! Defines the interface for resolving a public address to a location.

use crate::domain::entities::{GeoLocation, PublicAddress};
use crate::domain::errors::LookupError;
use async_trait::async_trait;

/// Geolocation lookup for a public address.
///
/// This is an outbound port. Implementations normalize their provider's
/// field names into `GeoLocation` and validate the coordinate range before
/// returning. Errors are tagged `Stage::Location`.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Short name of the backing service, for logs and the health endpoint.
    fn name(&self) -> &'static str;

    /// Resolve the address. Issues exactly one outbound call.
    async fn resolve(&self, address: &PublicAddress) -> Result<GeoLocation, LookupError>;
}
