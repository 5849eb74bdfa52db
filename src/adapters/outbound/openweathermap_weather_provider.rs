//! OpenWeatherMap Weather Provider
//!
//! Implements WeatherProvider using OpenWeatherMap's current weather API.
//! Requires an API key.

use super::http_json::{fetch_json, join_segments, parse_base_url};
use crate::domain::entities::WeatherObservation;
use crate::domain::errors::LookupError;
use crate::domain::ports::WeatherProvider;
use crate::domain::value_objects::Stage;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

pub const OPENWEATHERMAP_DEFAULT_URL: &str = "https://api.openweathermap.org";

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
}

/// Response from `GET /data/2.5/weather?units=metric`.
#[derive(Debug, Deserialize)]
struct OwmResponse {
    #[serde(default)]
    weather: Vec<Condition>,
    main: MainBlock,
}

impl OwmResponse {
    /// The conditions list may legitimately be empty; that is reported as
    /// `EmptyData` rather than read past its end.
    fn into_observation(self) -> Result<WeatherObservation, LookupError> {
        let Some(first) = self.weather.into_iter().next() else {
            return Err(LookupError::empty_data(
                Stage::Weather,
                "weather conditions list is empty",
            ));
        };
        WeatherObservation::new(self.main.temp, Some(first.description))
            .map_err(|reason| LookupError::decode(Stage::Weather, reason.to_string()))
    }
}

/// OpenWeatherMap weather provider.
pub struct OpenWeatherMapProvider {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl OpenWeatherMapProvider {
    /// Create the provider. The key comes from configuration, never a literal.
    pub fn new(client: Client, base_url: &str, api_key: String) -> anyhow::Result<Self> {
        if api_key.trim().is_empty() {
            anyhow::bail!("OpenWeatherMap API key is empty");
        }
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
            api_key,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherMapProvider {
    fn name(&self) -> &'static str {
        "openweathermap"
    }

    async fn resolve(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherObservation, LookupError> {
        let url = join_segments(&self.base_url, &["data", "2.5", "weather"]);
        let request = self.client.get(url).query(&[
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
        ]);
        let resp: OwmResponse = fetch_json(Stage::Weather, request).await?;

        resp.into_observation()
    }
}
