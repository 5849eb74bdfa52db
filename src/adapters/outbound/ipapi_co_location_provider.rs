//! ipapi.co Location Provider
//!
//! Implements LocationProvider using ipapi.co's per-address JSON endpoint.

use super::http_json::{fetch_json, join_segments, parse_base_url};
use crate::domain::entities::{GeoLocation, PublicAddress};
use crate::domain::errors::LookupError;
use crate::domain::ports::LocationProvider;
use crate::domain::value_objects::Stage;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

pub const IPAPI_CO_DEFAULT_URL: &str = "https://ipapi.co";

/// Response from `GET /{address}/json/`.
///
/// Failures (reserved ranges, rate limiting) come back with status 200 and
/// `{"error": true, "reason": "..."}` instead of location fields.
#[derive(Debug, Deserialize)]
struct IpapiCoResponse {
    #[serde(default)]
    error: bool,
    reason: Option<String>,
    city: Option<String>,
    country_name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl IpapiCoResponse {
    fn into_location(self) -> Result<GeoLocation, String> {
        if self.error {
            return Err(format!(
                "provider reported an error: {}",
                self.reason.as_deref().unwrap_or("unknown reason")
            ));
        }
        let latitude = self.latitude.ok_or("missing field `latitude`")?;
        let longitude = self.longitude.ok_or("missing field `longitude`")?;
        GeoLocation::new(
            self.city.unwrap_or_default(),
            self.country_name.unwrap_or_default(),
            latitude,
            longitude,
        )
        .map_err(|e| e.to_string())
    }
}

/// ipapi.co location provider.
pub struct IpapiCoLocationProvider {
    client: Client,
    base_url: Url,
}

impl IpapiCoLocationProvider {
    pub fn new(client: Client, base_url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }
}

#[async_trait]
impl LocationProvider for IpapiCoLocationProvider {
    fn name(&self) -> &'static str {
        "ipapi.co"
    }

    async fn resolve(&self, address: &PublicAddress) -> Result<GeoLocation, LookupError> {
        let url = join_segments(&self.base_url, &[address.as_str(), "json", ""]);
        let resp: IpapiCoResponse = fetch_json(Stage::Location, self.client.get(url)).await?;

        resp.into_location()
            .map_err(|reason| LookupError::decode(Stage::Location, reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::LookupCause;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn resolve_with(body: serde_json::Value) -> Result<GeoLocation, LookupError> {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/203.0.113.9/json/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = IpapiCoLocationProvider::new(Client::new(), &mock_server.uri()).unwrap();
        let address = PublicAddress::parse("203.0.113.9").unwrap();
        provider.resolve(&address).await
    }

    #[tokio::test]
    async fn test_resolve_normalizes_fields() {
        let loc = resolve_with(serde_json::json!({
            "ip": "203.0.113.9",
            "city": "Paris",
            "region": "Île-de-France",
            "country_name": "France",
            "country_code": "FR",
            "latitude": 48.85,
            "longitude": 2.35
        }))
        .await
        .unwrap();

        assert_eq!(loc, GeoLocation::new("Paris", "France", 48.85, 2.35).unwrap());
    }

    #[tokio::test]
    async fn test_resolve_null_city_becomes_empty() {
        let loc = resolve_with(serde_json::json!({
            "city": null,
            "country_name": "France",
            "latitude": 46.0,
            "longitude": 2.0
        }))
        .await
        .unwrap();

        assert_eq!(loc.city, "");
        assert_eq!(loc.country, "France");
    }

    #[tokio::test]
    async fn test_resolve_error_payload_is_decode_error() {
        let err = resolve_with(serde_json::json!({
            "ip": "203.0.113.9",
            "error": true,
            "reason": "Reserved IP Address",
            "reserved": true
        }))
        .await
        .unwrap_err();

        assert_eq!(err.stage, Stage::Location);
        match err.cause {
            LookupCause::Decode(msg) => assert!(msg.contains("Reserved IP Address")),
            other => panic!("unexpected cause: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_missing_coordinates_is_decode_error() {
        let err = resolve_with(serde_json::json!({
            "city": "Paris",
            "country_name": "France"
        }))
        .await
        .unwrap_err();

        assert!(matches!(err.cause, LookupCause::Decode(_)));
    }

    #[tokio::test]
    async fn test_resolve_out_of_range_is_decode_error() {
        let err = resolve_with(serde_json::json!({
            "city": "Nowhere",
            "country_name": "Atlantis",
            "latitude": 123.0,
            "longitude": 2.35
        }))
        .await
        .unwrap_err();

        assert_eq!(err.stage, Stage::Location);
        assert!(matches!(err.cause, LookupCause::Decode(_)));
    }
}
