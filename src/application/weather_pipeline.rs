//! Weather Pipeline - Main application use case
//!
//! Sequences the three lookups (address, location, weather) and composes
//! their results. This is the primary interface for the inbound adapter.

use crate::domain::entities::ComposedWeather;
use crate::domain::errors::LookupError;
use crate::domain::ports::{AddressProvider, LocationProvider, WeatherProvider};
use crate::domain::value_objects::PipelineState;
use std::sync::Arc;

/// Outcome of one pipeline run: the composed result or the first stage failure.
pub type PipelineResult = Result<ComposedWeather, LookupError>;

/// Weather pipeline - main application use case.
///
/// Each call to [`run`](Self::run) is an isolated execution:
/// 1. Discovers the caller's public address
/// 2. Geolocates that address
/// 3. Fetches current weather at the resolved coordinates
///
/// The first failing stage ends the run; later stages are never invoked.
/// The pipeline holds only shared, immutable providers, so one instance
/// serves any number of concurrent runs.
pub struct WeatherPipeline {
    address: Arc<dyn AddressProvider>,
    location: Arc<dyn LocationProvider>,
    weather: Arc<dyn WeatherProvider>,
}

impl WeatherPipeline {
    /// Create a new pipeline from one provider per stage.
    pub fn new(
        address: Arc<dyn AddressProvider>,
        location: Arc<dyn LocationProvider>,
        weather: Arc<dyn WeatherProvider>,
    ) -> Self {
        Self {
            address,
            location,
            weather,
        }
    }

    /// Names of the configured providers, in stage order.
    pub fn provider_names(&self) -> [&'static str; 3] {
        [self.address.name(), self.location.name(), self.weather.name()]
    }

    /// Execute one run.
    ///
    /// Cancelling the returned future (dropping it) aborts the in-flight
    /// outbound call; nothing needs cleaning up since no state is kept.
    pub async fn run(&self) -> PipelineResult {
        let mut state = PipelineState::default();

        match self.resolve_all(&mut state).await {
            Ok(composed) => {
                tracing::info!(
                    "weather resolved for {}: {}°C",
                    composed.location.display_name(),
                    composed.weather.temperature_celsius
                );
                Ok(composed)
            }
            Err(err) => {
                state = state.fail();
                tracing::warn!("pipeline ended in {:?}: {}", state, err);
                Err(err)
            }
        }
    }

    async fn resolve_all(&self, state: &mut PipelineState) -> PipelineResult {
        *state = state.advance();
        let address = self.address.resolve().await?;
        tracing::debug!("public address fetched via {}: {}", self.address.name(), address);

        *state = state.advance();
        let location = self.location.resolve(&address).await?;
        tracing::debug!(
            "location fetched via {} for {}: {:?}",
            self.location.name(),
            address,
            location
        );

        *state = state.advance();
        let weather = self
            .weather
            .resolve(location.latitude, location.longitude)
            .await?;
        tracing::debug!(
            "weather fetched via {} for ({}, {}): {:?}",
            self.weather.name(),
            location.latitude,
            location.longitude,
            weather
        );

        *state = state.advance();
        debug_assert_eq!(*state, PipelineState::Done);

        Ok(ComposedWeather {
            address,
            location,
            weather,
        })
    }
}
