//! geoweather - current weather at the caller's network location
//!
//! This is the composition root that wires together all the components.

use geoweather::adapters::inbound::WebServer;
use geoweather::adapters::outbound::{build_http_client, ProviderSet};
use geoweather::infrastructure::shutdown_signal;
use geoweather::{load_config, WeatherPipeline};
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    tracing::debug!("configuration: {:?}", cfg);

    // ===== COMPOSITION ROOT =====

    // 1. Outbound adapters, sharing one HTTP client
    let client = build_http_client(cfg.request_timeout())?;
    let providers = ProviderSet::from_config(&cfg, client)?;

    // 2. Application service
    let pipeline = Arc::new(WeatherPipeline::new(
        providers.address,
        providers.location,
        providers.weather,
    ));

    let [address, location, weather] = pipeline.provider_names();
    tracing::info!(
        "starting geoweather listen={} providers={}/{}/{} timeout={}s",
        cfg.listen_addr,
        address,
        location,
        weather,
        cfg.request_timeout_secs
    );

    // 3. Inbound adapter
    let server = WebServer::new(cfg.listen_addr.clone(), pipeline);
    server.run(shutdown_signal()).await
}
