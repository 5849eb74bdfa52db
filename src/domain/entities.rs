//! Domain Entities - Core business objects
//!
//! Every entity is created fresh for a single pipeline run and dropped once
//! the composed result has been rendered. Constructors enforce the invariants,
//! so a value of these types is always valid.

use crate::domain::errors::InvalidEntity;
use serde::Serialize;
use std::fmt;

/// The caller's public network address, as reported by the address service.
///
/// Opaque apart from being non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicAddress(String);

impl PublicAddress {
    /// Build an address from raw provider output.
    ///
    /// Surrounding whitespace is trimmed. Returns `None` when nothing is left.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublicAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resolved geographic location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoLocation {
    /// City name (may be empty)
    pub city: String,
    /// Country name (may be empty)
    pub country: String,
    /// Latitude in degrees, within [-90, 90]
    pub latitude: f64,
    /// Longitude in degrees, within [-180, 180]
    pub longitude: f64,
}

impl GeoLocation {
    /// Create a location, rejecting non-finite or out-of-range coordinates.
    pub fn new(
        city: impl Into<String>,
        country: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, InvalidEntity> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidEntity::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidEntity::Longitude(longitude));
        }
        Ok(Self {
            city: city.into(),
            country: country.into(),
            latitude,
            longitude,
        })
    }

    /// "City, Country", skipping whichever part is empty.
    pub fn display_name(&self) -> String {
        match (self.city.is_empty(), self.country.is_empty()) {
            (false, false) => format!("{}, {}", self.city, self.country),
            (false, true) => self.city.clone(),
            (true, false) => self.country.clone(),
            (true, true) => format!("{:.2}, {:.2}", self.latitude, self.longitude),
        }
    }
}

/// Current weather conditions at a location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherObservation {
    /// Air temperature in degrees Celsius
    pub temperature_celsius: f64,
    /// Textual summary, for providers that supply one
    pub description: Option<String>,
}

impl WeatherObservation {
    /// Create an observation, rejecting a non-finite temperature.
    ///
    /// A blank description is treated as absent.
    pub fn new(
        temperature_celsius: f64,
        description: Option<String>,
    ) -> Result<Self, InvalidEntity> {
        if !temperature_celsius.is_finite() {
            return Err(InvalidEntity::Temperature(temperature_celsius));
        }
        let description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        Ok(Self {
            temperature_celsius,
            description,
        })
    }
}

/// Successful output of all three stages, ready for presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposedWeather {
    pub address: PublicAddress,
    pub location: GeoLocation,
    pub weather: WeatherObservation,
}
