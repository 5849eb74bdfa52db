//! Domain Layer
//!
//! Entities, value objects, errors and the outbound ports of the weather
//! pipeline. Nothing here performs I/O.

pub mod entities;
pub mod errors;
pub mod ports;
pub mod value_objects;

pub use entities::{ComposedWeather, GeoLocation, PublicAddress, WeatherObservation};
pub use errors::{InvalidEntity, LookupCause, LookupError};
pub use value_objects::{PipelineState, Stage};
