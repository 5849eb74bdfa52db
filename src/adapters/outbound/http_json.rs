//! Shared HTTP plumbing for the outbound provider adapters.
//!
//! Every adapter performs a single GET and decodes a JSON body. This module
//! owns the mapping from reqwest/serde failures to `LookupError` causes so
//! that the adapters only deal with their provider's response shape.

use crate::domain::errors::LookupError;
use crate::domain::value_objects::Stage;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Build the HTTP client shared by all provider adapters.
///
/// The timeout bounds each outbound call end to end (connect, send, read).
pub fn build_http_client(timeout: Duration) -> anyhow::Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(concat!("geoweather/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Parse a provider base URL, dropping any trailing slash.
pub fn parse_base_url(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim_end_matches('/'))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("provider url cannot be a base: {}", raw);
    }
    Ok(url)
}

/// Append path segments to a base URL, percent-encoding each one.
pub fn join_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Send the request and decode a JSON body.
///
/// - connect errors, timeouts and non-2xx statuses are `Transport`
/// - a body that does not match `T` is `Decode`
///
/// Messages never carry the request URL, since query strings may hold
/// provider credentials.
pub async fn fetch_json<T: DeserializeOwned>(
    stage: Stage,
    request: RequestBuilder,
) -> Result<T, LookupError> {
    let response = request
        .send()
        .await
        .map_err(|e| LookupError::transport(stage, describe(e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(LookupError::transport(
            stage,
            format!("unexpected status {}", status),
        ));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| LookupError::transport(stage, describe(e)))?;

    serde_json::from_slice(&body).map_err(|e| LookupError::decode(stage, e.to_string()))
}

fn describe(err: reqwest::Error) -> String {
    let err = err.without_url();
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::LookupCause;
    use serde::Deserialize;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize)]
    struct Probe {
        value: u32,
    }

    fn client() -> Client {
        build_http_client(Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn test_parse_base_url_strips_trailing_slash() {
        let url = parse_base_url("http://localhost:1234/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:1234/");
        let joined = join_segments(&url, &["ip"]);
        assert_eq!(joined.as_str(), "http://localhost:1234/ip");
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        assert!(parse_base_url("not a url").is_err());
        assert!(parse_base_url("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_join_segments_encodes() {
        let base = parse_base_url("http://example.com/api").unwrap();
        let url = join_segments(&base, &["a b", "json", ""]);
        assert_eq!(url.as_str(), "http://example.com/api/a%20b/json/");
    }

    #[tokio::test]
    async fn test_fetch_json_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/probe"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": 7})))
            .mount(&mock_server)
            .await;

        let probe: Probe = fetch_json(
            Stage::Address,
            client().get(format!("{}/probe", mock_server.uri())),
        )
        .await
        .unwrap();
        assert_eq!(probe.value, 7);
    }

    #[tokio::test]
    async fn test_fetch_json_non_success_status_is_transport() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/probe"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .mount(&mock_server)
            .await;

        let err = fetch_json::<Probe>(
            Stage::Location,
            client().get(format!("{}/probe", mock_server.uri())),
        )
        .await
        .unwrap_err();

        assert_eq!(err.stage, Stage::Location);
        match err.cause {
            LookupCause::Transport(msg) => assert!(msg.contains("503")),
            other => panic!("unexpected cause: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_json_malformed_body_is_decode() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/probe"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let err = fetch_json::<Probe>(
            Stage::Weather,
            client().get(format!("{}/probe", mock_server.uri())),
        )
        .await
        .unwrap_err();

        assert_eq!(err.stage, Stage::Weather);
        assert!(matches!(err.cause, LookupCause::Decode(_)));
    }

    #[tokio::test]
    async fn test_fetch_json_timeout_is_transport() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/probe"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"value": 1}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let client = build_http_client(Duration::from_millis(50)).unwrap();
        let err = fetch_json::<Probe>(
            Stage::Address,
            client.get(format!("{}/probe", mock_server.uri())),
        )
        .await
        .unwrap_err();

        assert_eq!(err.cause, LookupCause::Transport("request timed out".to_string()));
    }

    #[tokio::test]
    async fn test_fetch_json_connection_refused_is_transport() {
        // Port 9 (discard) is not listening on test hosts
        let err = fetch_json::<Probe>(Stage::Address, client().get("http://127.0.0.1:9/probe"))
            .await
            .unwrap_err();

        assert!(matches!(err.cause, LookupCause::Transport(_)));
    }

    #[tokio::test]
    async fn test_fetch_json_error_omits_query_string() {
        let err = fetch_json::<Probe>(
            Stage::Weather,
            client()
                .get("http://127.0.0.1:9/data/2.5/weather")
                .query(&[("appid", "SUPERSECRETKEY")]),
        )
        .await
        .unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("Weather lookup failed: transport error"));
        assert!(!message.contains("SUPERSECRETKEY"));
        assert!(!message.contains("appid"));
    }
}
