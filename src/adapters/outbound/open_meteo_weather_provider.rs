//! Open-Meteo Weather Provider
//!
//! Implements WeatherProvider using Open-Meteo's forecast API (no API key).
//! Only the current temperature is requested, so observations carry no
//! description.

use super::http_json::{fetch_json, join_segments, parse_base_url};
use crate::domain::entities::WeatherObservation;
use crate::domain::errors::LookupError;
use crate::domain::ports::WeatherProvider;
use crate::domain::value_objects::Stage;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

pub const OPEN_METEO_DEFAULT_URL: &str = "https://api.open-meteo.com";

#[derive(Debug, Deserialize)]
struct CurrentData {
    #[serde(rename = "temperature_2m")]
    temperature: f64,
}

/// Response from `GET /v1/forecast?current=temperature_2m`.
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentData,
}

/// Open-Meteo weather provider.
pub struct OpenMeteoProvider {
    client: Client,
    base_url: Url,
}

impl OpenMeteoProvider {
    pub fn new(client: Client, base_url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    fn name(&self) -> &'static str {
        "open-meteo"
    }

    async fn resolve(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherObservation, LookupError> {
        let url = join_segments(&self.base_url, &["v1", "forecast"]);
        let request = self.client.get(url).query(&[
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current", "temperature_2m".to_string()),
            ("forecast_days", "1".to_string()),
        ]);
        let resp: ForecastResponse = fetch_json(Stage::Weather, request).await?;

        WeatherObservation::new(resp.current.temperature, None)
            .map_err(|reason| LookupError::decode(Stage::Weather, reason.to_string()))
    }
}
