//! ipify Address Provider
//!
//! Implements AddressProvider using the ipify JSON API.

use super::http_json::{fetch_json, parse_base_url};
use crate::domain::entities::PublicAddress;
use crate::domain::errors::LookupError;
use crate::domain::ports::AddressProvider;
use crate::domain::value_objects::Stage;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

pub const IPIFY_DEFAULT_URL: &str = "https://api.ipify.org";

#[derive(Debug, Deserialize)]
struct IpifyResponse {
    ip: String,
}

/// ipify address provider.
pub struct IpifyAddressProvider {
    client: Client,
    base_url: Url,
}

impl IpifyAddressProvider {
    pub fn new(client: Client, base_url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }
}

#[async_trait]
impl AddressProvider for IpifyAddressProvider {
    fn name(&self) -> &'static str {
        "ipify"
    }

    async fn resolve(&self) -> Result<PublicAddress, LookupError> {
        let request = self
            .client
            .get(self.base_url.clone())
            .query(&[("format", "json")]);
        let resp: IpifyResponse = fetch_json(Stage::Address, request).await?;

        PublicAddress::parse(&resp.ip)
            .ok_or_else(|| LookupError::decode(Stage::Address, "ip is empty"))
    }
}
