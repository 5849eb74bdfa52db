mod http_json;
mod httpbin_address_provider;
mod ip_api_location_provider;
mod ipapi_co_location_provider;
mod ipify_address_provider;
mod open_meteo_weather_provider;
mod openweathermap_weather_provider;

pub use http_json::build_http_client;
pub use httpbin_address_provider::{HttpbinAddressProvider, HTTPBIN_DEFAULT_URL};
pub use ip_api_location_provider::{IpApiLocationProvider, IP_API_DEFAULT_URL};
pub use ipapi_co_location_provider::{IpapiCoLocationProvider, IPAPI_CO_DEFAULT_URL};
pub use ipify_address_provider::{IpifyAddressProvider, IPIFY_DEFAULT_URL};
pub use open_meteo_weather_provider::{OpenMeteoProvider, OPEN_METEO_DEFAULT_URL};
pub use openweathermap_weather_provider::{OpenWeatherMapProvider, OPENWEATHERMAP_DEFAULT_URL};

use crate::config::{AddressProviderKind, Config, ConfigError, LocationProviderKind, WeatherProviderKind};
use crate::domain::ports::{AddressProvider, LocationProvider, WeatherProvider};
use reqwest::Client;
use std::sync::Arc;

/// One adapter per stage, chosen by configuration.
pub struct ProviderSet {
    pub address: Arc<dyn AddressProvider>,
    pub location: Arc<dyn LocationProvider>,
    pub weather: Arc<dyn WeatherProvider>,
}

impl ProviderSet {
    /// Build the configured adapters around one shared HTTP client.
    pub fn from_config(cfg: &Config, client: Client) -> anyhow::Result<Self> {
        let address: Arc<dyn AddressProvider> = match cfg.address_provider {
            AddressProviderKind::Httpbin => Arc::new(HttpbinAddressProvider::new(
                client.clone(),
                cfg.address_url.as_deref().unwrap_or(HTTPBIN_DEFAULT_URL),
            )?),
            AddressProviderKind::Ipify => Arc::new(IpifyAddressProvider::new(
                client.clone(),
                cfg.address_url.as_deref().unwrap_or(IPIFY_DEFAULT_URL),
            )?),
        };

        let location: Arc<dyn LocationProvider> = match cfg.location_provider {
            LocationProviderKind::IpApi => Arc::new(IpApiLocationProvider::new(
                client.clone(),
                cfg.location_url.as_deref().unwrap_or(IP_API_DEFAULT_URL),
            )?),
            LocationProviderKind::IpapiCo => Arc::new(IpapiCoLocationProvider::new(
                client.clone(),
                cfg.location_url.as_deref().unwrap_or(IPAPI_CO_DEFAULT_URL),
            )?),
        };

        let weather: Arc<dyn WeatherProvider> = match cfg.weather_provider {
            WeatherProviderKind::OpenMeteo => Arc::new(OpenMeteoProvider::new(
                client,
                cfg.weather_url.as_deref().unwrap_or(OPEN_METEO_DEFAULT_URL),
            )?),
            WeatherProviderKind::OpenWeatherMap => {
                let api_key = cfg
                    .openweathermap_api_key
                    .clone()
                    .ok_or(ConfigError::MissingApiKey)?;
                Arc::new(OpenWeatherMapProvider::new(
                    client,
                    cfg.weather_url
                        .as_deref()
                        .unwrap_or(OPENWEATHERMAP_DEFAULT_URL),
                    api_key,
                )?)
            }
        };

        Ok(Self {
            address,
            location,
            weather,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_builds_keyless_variant() {
        let set = ProviderSet::from_config(&Config::default(), Client::new()).unwrap();
        assert_eq!(set.address.name(), "httpbin");
        assert_eq!(set.location.name(), "ip-api");
        assert_eq!(set.weather.name(), "open-meteo");
    }

    #[test]
    fn test_openweathermap_variant() {
        let cfg = Config {
            address_provider: AddressProviderKind::Ipify,
            location_provider: LocationProviderKind::IpapiCo,
            weather_provider: WeatherProviderKind::OpenWeatherMap,
            openweathermap_api_key: Some("key".to_string()),
            ..Config::default()
        };
        let set = ProviderSet::from_config(&cfg, Client::new()).unwrap();
        assert_eq!(set.address.name(), "ipify");
        assert_eq!(set.location.name(), "ipapi.co");
        assert_eq!(set.weather.name(), "openweathermap");
    }

    #[test]
    fn test_openweathermap_without_key_fails() {
        let cfg = Config {
            weather_provider: WeatherProviderKind::OpenWeatherMap,
            ..Config::default()
        };
        assert!(ProviderSet::from_config(&cfg, Client::new()).is_err());
    }

    #[test]
    fn test_invalid_url_override_fails() {
        let cfg = Config {
            location_url: Some("not a url".to_string()),
            ..Config::default()
        };
        assert!(ProviderSet::from_config(&cfg, Client::new()).is_err());
    }
}
