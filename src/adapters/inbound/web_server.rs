//! Web Server
//!
//! HTTP front end: a static form, the endpoint that triggers a pipeline
//! run, and a health probe.

use super::views::{render_index, render_weather};
use crate::application::WeatherPipeline;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub providers: ProvidersInfo,
}

/// Names of the providers backing each stage.
#[derive(Debug, Serialize)]
pub struct ProvidersInfo {
    pub address: String,
    pub location: String,
    pub weather: String,
}

/// Web server state.
#[derive(Clone)]
pub struct WebState {
    pub pipeline: Arc<WeatherPipeline>,
}

impl WebState {
    pub fn new(pipeline: Arc<WeatherPipeline>) -> Self {
        Self { pipeline }
    }
}

/// Web server for the weather front end.
pub struct WebServer {
    listen_addr: String,
    state: WebState,
}

impl WebServer {
    pub fn new(listen_addr: String, pipeline: Arc<WeatherPipeline>) -> Self {
        Self {
            listen_addr,
            state: WebState::new(pipeline),
        }
    }

    /// Build the router with all routes and request tracing.
    pub fn router(state: WebState) -> Router {
        Router::new()
            .route("/", get(index_handler))
            .route("/weather", post(weather_handler))
            .route("/health", get(health_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Run the server until `shutdown` completes.
    pub async fn run<F>(&self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = Self::router(self.state.clone());

        let listener = TcpListener::bind(&self.listen_addr).await?;
        tracing::info!("web server listening on {}", self.listen_addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;
        tracing::info!("web server stopped");
        Ok(())
    }
}

// Handler functions

async fn index_handler() -> Html<&'static str> {
    Html(render_index())
}

/// A client disconnect drops this future, which cancels the in-flight lookup.
async fn weather_handler(State(state): State<WebState>) -> Response {
    match state.pipeline.run().await {
        Ok(composed) => Html(render_weather(&composed)).into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

async fn health_handler(State(state): State<WebState>) -> impl IntoResponse {
    let [address, location, weather] = state.pipeline.provider_names();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        providers: ProvidersInfo {
            address: address.to_string(),
            location: location.to_string(),
            weather: weather.to_string(),
        },
    })
}
