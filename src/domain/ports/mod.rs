mod address_provider;
mod location_provider;
mod weather_provider;

pub use address_provider::AddressProvider;
pub use location_provider::LocationProvider;
pub use weather_provider::WeatherProvider;
