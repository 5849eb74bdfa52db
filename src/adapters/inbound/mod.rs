mod views;
mod web_server;

pub use views::{escape_html, render_index, render_weather};
pub use web_server::{HealthResponse, ProvidersInfo, WebServer, WebState};
