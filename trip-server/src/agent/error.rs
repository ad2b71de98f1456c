//! Planning agent error types.

/// Errors from talking to the planning agent.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check TRIP_AGENT_API_KEY")]
    Unauthorized,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body could not be parsed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Booking or itinerary does not exist
    #[error("not found: {0}")]
    NotFound(String),
}

impl AgentError {
    /// Whether a retry against the same agent could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            AgentError::Http(e) => e.is_timeout() || e.is_connect(),
            AgentError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
