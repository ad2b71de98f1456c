//! HTTP client for the planning agent.
//!
//! The agent turns free text into a structured query and a set of candidate
//! trips, and owns bookings. This client speaks its JSON API.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use super::error::AgentError;
use super::types::{BookingRequest, BookingResponse, ChatRequest, ChatResponse, ItineraryResponse};

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the agent client.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Base URL of the agent API, without trailing slash
    pub base_url: String,
    /// Optional API key, sent as `x-apikey`
    pub api_key: Option<String>,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl AgentConfig {
    /// Create a new config for the agent at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Planning agent API client.
///
/// Uses a semaphore to limit concurrent requests.
#[derive(Debug, Clone)]
pub struct AgentClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl AgentClient {
    /// Create a new agent client with the given configuration.
    pub fn new(config: AgentConfig) -> Result<Self, AgentError> {
        let mut headers = HeaderMap::new();

        if let Some(key) = &config.api_key {
            let api_key = HeaderValue::from_str(key).map_err(|_| AgentError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
            headers.insert("x-apikey", api_key);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the agent to plan a trip from free text.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AgentError> {
        let url = format!("{}/chat", self.base_url);
        self.send(self.http.post(&url).json(request), "chat").await
    }

    /// Book a candidate.
    pub async fn book(&self, request: &BookingRequest) -> Result<BookingResponse, AgentError> {
        let url = format!("{}/book", self.base_url);
        self.send(self.http.post(&url).json(request), "booking").await
    }

    /// Fetch a stored booking.
    pub async fn itinerary(&self, booking_id: &str) -> Result<ItineraryResponse, AgentError> {
        let url = format!("{}/itinerary/{}", self.base_url, booking_id);
        self.send(self.http.get(&url), &format!("itinerary {booking_id}"))
            .await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<T, AgentError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| AgentError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), what, "agent responded");

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AgentError::Unauthorized);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AgentError::NotFound(what.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        parse_body(&body)
    }
}

/// Parse a response body, keeping a prefix of it on failure.
fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, AgentError> {
    serde_json::from_str(body).map_err(|e| AgentError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(500).collect()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = AgentConfig::new("http://localhost:8000/")
            .with_api_key("test-key")
            .with_max_concurrent(10)
            .with_timeout(60);

        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = AgentConfig::new("http://localhost:8000");

        assert_eq!(config.api_key, None);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn client_rejects_bad_api_key() {
        let config = AgentConfig::new("http://localhost:8000").with_api_key("bad\nkey");
        assert!(matches!(
            AgentClient::new(config),
            Err(AgentError::Api { status: 0, .. })
        ));
    }

    #[test]
    fn client_keeps_base_url() {
        let client = AgentClient::new(AgentConfig::new("http://agent.local/")).unwrap();
        assert_eq!(client.base_url(), "http://agent.local");
    }

    #[test]
    fn parse_error_truncates_body() {
        let body = "x".repeat(2000);
        let err = parse_body::<ChatResponse>(&body).unwrap_err();
        match err {
            AgentError::Json { body: Some(b), .. } => assert_eq!(b.len(), 500),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_agent_is_http_error() {
        // Port 9 (discard) on localhost is closed in test environments
        let client =
            AgentClient::new(AgentConfig::new("http://127.0.0.1:9").with_timeout(2)).unwrap();
        let err = client.itinerary("b-1").await.unwrap_err();
        assert!(matches!(err, AgentError::Http(_)));
    }
}
