//! ip-api.com Location Provider
//!
//! Implements LocationProvider using ip-api.com's JSON endpoint.

use super::http_json::{fetch_json, join_segments, parse_base_url};
use crate::domain::entities::{GeoLocation, PublicAddress};
use crate::domain::errors::LookupError;
use crate::domain::ports::LocationProvider;
use crate::domain::value_objects::Stage;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

pub const IP_API_DEFAULT_URL: &str = "http://ip-api.com";

/// Response from `GET /json/{address}`.
///
/// `status` is "success" or "fail"; a failed lookup carries `message`
/// ("private range", "invalid query", ...) and no location fields.
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: Option<String>,
    message: Option<String>,
    city: Option<String>,
    country: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpApiResponse {
    fn into_location(self) -> Result<GeoLocation, String> {
        if self.status.as_deref() == Some("fail") {
            return Err(format!(
                "provider reported failure: {}",
                self.message.as_deref().unwrap_or("no message")
            ));
        }
        let (Some(lat), Some(lon)) = (self.lat, self.lon) else {
            return Err("response has no lat/lon".to_string());
        };
        GeoLocation::new(
            self.city.unwrap_or_default(),
            self.country.unwrap_or_default(),
            lat,
            lon,
        )
        .map_err(|e| e.to_string())
    }
}

/// ip-api.com location provider.
pub struct IpApiLocationProvider {
    client: Client,
    base_url: Url,
}

impl IpApiLocationProvider {
    pub fn new(client: Client, base_url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }
}

#[async_trait]
impl LocationProvider for IpApiLocationProvider {
    fn name(&self) -> &'static str {
        "ip-api"
    }

    async fn resolve(&self, address: &PublicAddress) -> Result<GeoLocation, LookupError> {
        let url = join_segments(&self.base_url, &["json", address.as_str()]);
        let resp: IpApiResponse = fetch_json(Stage::Location, self.client.get(url)).await?;

        resp.into_location()
            .map_err(|reason| LookupError::decode(Stage::Location, reason))
    }
}
