//! httpbin Address Provider
//!
//! Implements AddressProvider using httpbin's `/ip` echo endpoint.

use super::http_json::{fetch_json, join_segments, parse_base_url};
use crate::domain::entities::PublicAddress;
use crate::domain::errors::LookupError;
use crate::domain::ports::AddressProvider;
use crate::domain::value_objects::Stage;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

pub const HTTPBIN_DEFAULT_URL: &str = "https://httpbin.org";

#[derive(Debug, Deserialize)]
struct IpResponse {
    origin: String,
}

/// httpbin address provider.
///
/// `origin` may list a proxy chain ("client, proxy1, proxy2"); the first
/// entry is the caller.
pub struct HttpbinAddressProvider {
    client: Client,
    base_url: Url,
}

impl HttpbinAddressProvider {
    pub fn new(client: Client, base_url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }
}

#[async_trait]
impl AddressProvider for HttpbinAddressProvider {
    fn name(&self) -> &'static str {
        "httpbin"
    }

    async fn resolve(&self) -> Result<PublicAddress, LookupError> {
        let url = join_segments(&self.base_url, &["ip"]);
        let resp: IpResponse = fetch_json(Stage::Address, self.client.get(url)).await?;

        let first = resp.origin.split(',').next().unwrap_or_default();
        PublicAddress::parse(first)
            .ok_or_else(|| LookupError::decode(Stage::Address, "origin is empty"))
    }
}
