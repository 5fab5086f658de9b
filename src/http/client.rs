//! HTTP client for suite triggering
//!
//! Wraps reqwest with the base URL, timeout and header conventions of the
//! remote test service.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use serde_json::Value;
use std::error::Error as StdError;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::utils::Timer;

/// Per-trigger errors
///
/// These never abort a run; the runner records the message and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TriggerError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    #[error("Invalid JSON response: {0}")]
    Decode(String),
}

/// Anything that can fire a suite trigger
#[async_trait]
pub trait EndpointClient: Send + Sync {
    /// POST to `endpoint` and return the decoded JSON acknowledgement
    async fn trigger(&self, endpoint: &str) -> std::result::Result<Value, TriggerError>;
}

/// HTTP client bound to the test service
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            timeout_secs,
        })
    }

    /// Build full URL
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// POST an empty JSON request and decode the JSON response body
    pub async fn post_json(&self, path: &str) -> std::result::Result<Value, TriggerError> {
        let url = self.build_url(path);
        debug!("Sending POST request to {}", url);

        let timer = Timer::start(format!("POST {url}"));

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TriggerError::Transport(format!(
                        "timed out after {} seconds: {}",
                        self.timeout_secs,
                        error_chain(&e)
                    ))
                } else {
                    TriggerError::Transport(error_chain(&e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            timer.stop();
            return Err(TriggerError::HttpStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TriggerError::Transport(error_chain(&e)))?;

        timer.stop();

        serde_json::from_str(&body).map_err(|e| TriggerError::Decode(e.to_string()))
    }
}

#[async_trait]
impl EndpointClient for HttpClient {
    async fn trigger(&self, endpoint: &str) -> std::result::Result<Value, TriggerError> {
        self.post_json(endpoint).await
    }
}

/// Flatten an error and its sources into one line
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::serve_once;
    use std::fmt;

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "connection refused")
        }
    }

    impl StdError for Inner {}

    #[derive(Debug)]
    struct Outer(Inner);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "error sending request")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_build_url() {
        let client = HttpClient::new("http://localhost:8000/", 30).unwrap();
        assert_eq!(
            client.build_url("/test-login"),
            "http://localhost:8000/test-login"
        );
        assert_eq!(
            client.build_url("https://other.example/x"),
            "https://other.example/x"
        );
    }

    #[test]
    fn test_trigger_error_messages() {
        assert_eq!(
            TriggerError::HttpStatus(500).to_string(),
            "HTTP error! status: 500"
        );
        assert!(TriggerError::Transport("connection refused".into())
            .to_string()
            .contains("connection refused"));
        assert!(TriggerError::Decode("expected value".into())
            .to_string()
            .starts_with("Invalid JSON response"));
    }

    #[test]
    fn test_error_chain() {
        assert_eq!(
            error_chain(&Outer(Inner)),
            "error sending request: connection refused"
        );
    }

    #[tokio::test]
    async fn test_server_error_status_is_http_status_error() {
        let (base, server) = serve_once("500 Internal Server Error", "").await;
        let client = HttpClient::new(base, 5).unwrap();

        let result = client.trigger("/test-login").await;
        assert_eq!(result, Err(TriggerError::HttpStatus(500)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let (base, server) = serve_once("200 OK", "hello").await;
        let client = HttpClient::new(base, 5).unwrap();

        let result = client.trigger("/test-login").await;
        assert!(matches!(result, Err(TriggerError::Decode(_))));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_trigger_posts_json_content_type() {
        let (base, server) = serve_once("200 OK", r#"{"test_started":true}"#).await;
        let client = HttpClient::new(base, 5).unwrap();

        let body = client.trigger("/test-login").await.unwrap();
        assert_eq!(body, serde_json::json!({ "test_started": true }));

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("post /test-login http/1.1\r\n"));
        assert!(request.contains("content-type: application/json\r\n"));
    }

    #[test]
    fn test_unreachable_host_is_transport_error() {
        // Port 9 (discard) is not expected to accept HTTP on loopback.
        let client = HttpClient::new("http://127.0.0.1:9", 2).unwrap();
        let result = tokio_test::block_on(client.trigger("/test-login"));
        assert!(matches!(result, Err(TriggerError::Transport(_))));
    }
}
