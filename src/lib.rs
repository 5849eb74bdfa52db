//! geoweather Library
//!
//! Resolves the current weather at the caller's network location by chaining
//! three external lookups (public address, geolocation, weather) behind
//! pluggable provider ports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use application::{PipelineResult, WeatherPipeline};
pub use config::{load_config, Config};
pub use domain::entities::{ComposedWeather, GeoLocation, PublicAddress, WeatherObservation};
pub use domain::errors::{InvalidEntity, LookupCause, LookupError};
pub use domain::ports::{AddressProvider, LocationProvider, WeatherProvider};
pub use domain::value_objects::{PipelineState, Stage};
