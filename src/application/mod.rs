//! Application Layer
//!
//! Use cases that orchestrate the domain ports.

mod weather_pipeline;

pub use weather_pipeline::{PipelineResult, WeatherPipeline};
