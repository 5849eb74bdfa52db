use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors detected while reading configuration at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown {stage} provider '{value}' (expected one of: {expected})")]
    UnknownProvider {
        stage: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("OPENWEATHERMAP_API_KEY is required when the openweathermap provider is selected")]
    MissingApiKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum AddressProviderKind {
    Httpbin,
    Ipify,
}

impl FromStr for AddressProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "httpbin" => Ok(Self::Httpbin),
            "ipify" => Ok(Self::Ipify),
            _ => Err(ConfigError::UnknownProvider {
                stage: "address",
                value: s.to_string(),
                expected: "httpbin, ipify",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LocationProviderKind {
    IpApi,
    IpapiCo,
}

impl FromStr for LocationProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ip-api" | "ip-api.com" => Ok(Self::IpApi),
            "ipapi-co" | "ipapi.co" => Ok(Self::IpapiCo),
            _ => Err(ConfigError::UnknownProvider {
                stage: "location",
                value: s.to_string(),
                expected: "ip-api, ipapi-co",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum WeatherProviderKind {
    OpenMeteo,
    OpenWeatherMap,
}

impl FromStr for WeatherProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open-meteo" | "openmeteo" => Ok(Self::OpenMeteo),
            "openweathermap" | "owm" => Ok(Self::OpenWeatherMap),
            _ => Err(ConfigError::UnknownProvider {
                stage: "weather",
                value: s.to_string(),
                expected: "open-meteo, openweathermap",
            }),
        }
    }
}

/// Process configuration, loaded once at startup and never mutated.
#[derive(Deserialize, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub debug: bool,

    // Provider selection
    pub address_provider: AddressProviderKind,
    pub location_provider: LocationProviderKind,
    pub weather_provider: WeatherProviderKind,

    // Base URL overrides (None = provider default)
    pub address_url: Option<String>,
    pub location_url: Option<String>,
    pub weather_url: Option<String>,

    pub openweathermap_api_key: Option<String>,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            debug: false,
            address_provider: AddressProviderKind::Httpbin,
            location_provider: LocationProviderKind::IpApi,
            weather_provider: WeatherProviderKind::OpenMeteo,
            address_url: None,
            location_url: None,
            weather_url: None,
            openweathermap_api_key: None,
            request_timeout_secs: 5,
        }
    }
}

// The API key must never reach the logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("listen_addr", &self.listen_addr)
            .field("debug", &self.debug)
            .field("address_provider", &self.address_provider)
            .field("location_provider", &self.location_provider)
            .field("weather_provider", &self.weather_provider)
            .field("address_url", &self.address_url)
            .field("location_url", &self.location_url)
            .field("weather_url", &self.weather_url)
            .field(
                "openweathermap_api_key",
                &self.openweathermap_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

pub fn load_config() -> anyhow::Result<Config> {
    load_config_from(|key| std::env::var(key).ok())
}

/// Build the configuration from an arbitrary variable lookup.
pub fn load_config_from<F>(var: F) -> anyhow::Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = Config::default();

    let listen_addr = var("GEOWEATHER_LISTEN_ADDR").unwrap_or(defaults.listen_addr);

    let debug = var("DEBUG").is_some();

    let address_provider = match var("GEOWEATHER_ADDRESS_PROVIDER") {
        Some(v) => v.parse()?,
        None => defaults.address_provider,
    };

    let location_provider = match var("GEOWEATHER_LOCATION_PROVIDER") {
        Some(v) => v.parse()?,
        None => defaults.location_provider,
    };

    let weather_provider = match var("GEOWEATHER_WEATHER_PROVIDER") {
        Some(v) => v.parse()?,
        None => defaults.weather_provider,
    };

    let address_url = var("GEOWEATHER_ADDRESS_URL");
    let location_url = var("GEOWEATHER_LOCATION_URL");
    let weather_url = var("GEOWEATHER_WEATHER_URL");

    let openweathermap_api_key = var("OPENWEATHERMAP_API_KEY")
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());

    let request_timeout_secs = var("GEOWEATHER_REQUEST_TIMEOUT_SECS")
        .and_then(|v| v.parse().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(defaults.request_timeout_secs);

    if weather_provider == WeatherProviderKind::OpenWeatherMap && openweathermap_api_key.is_none()
    {
        return Err(ConfigError::MissingApiKey.into());
    }

    Ok(Config {
        listen_addr,
        debug,
        address_provider,
        location_provider,
        weather_provider,
        address_url,
        location_url,
        weather_url,
        openweathermap_api_key,
        request_timeout_secs,
    })
}
