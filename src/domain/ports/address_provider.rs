//! Address Provider Port
//!
//! Defines the interface for discovering the caller's public network address.

use crate::domain::entities::PublicAddress;
use crate::domain::errors::LookupError;
use async_trait::async_trait;

/// Source of the caller's public network address.
///
/// This is an outbound port. Implementations query an external
/// address-discovery service and fail with a `LookupError` tagged
/// `Stage::Address`.
#[async_trait]
pub trait AddressProvider: Send + Sync {
    /// Short name of the backing service, for logs and the health endpoint.
    fn name(&self) -> &'static str;

    /// Discover the public address. Issues exactly one outbound call.
    async fn resolve(&self) -> Result<PublicAddress, LookupError>;
}
