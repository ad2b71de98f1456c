//! Server configuration, read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::agent::AgentConfig;
use crate::cache::CacheConfig;
use crate::scoring::{DistanceStrategy, ScoringConfig};

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Default directory for static assets.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Errors from reading configuration.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

impl ConfigError {
    fn invalid(var: &'static str, message: impl ToString) -> Self {
        ConfigError::Invalid {
            var,
            message: message.to_string(),
        }
    }
}

/// Everything the binary needs to start serving.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,

    /// Remote planning agent; `None` serves mock data only
    pub agent: Option<AgentConfig>,

    /// JSON file of candidates for the mock agent
    pub mock_data: Option<PathBuf>,

    /// Directory served under `/static`
    pub static_dir: PathBuf,

    pub scoring: ScoringConfig,
    pub cache: CacheConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    ///
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind_addr = get("TRIP_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid("TRIP_BIND_ADDR", e))?;

        let agent = get("TRIP_AGENT_URL").map(|url| {
            let config = AgentConfig::new(url);
            match get("TRIP_AGENT_API_KEY") {
                Some(key) => config.with_api_key(key),
                None => config,
            }
        });

        let distance = match get("TRIP_DISTANCE") {
            Some(v) => v
                .parse::<DistanceStrategy>()
                .map_err(|e| ConfigError::invalid("TRIP_DISTANCE", e))?,
            None => DistanceStrategy::default(),
        };

        let mut cache = CacheConfig::default();
        if let Some(v) = get("TRIP_CACHE_TTL_SECS") {
            let secs = v
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::invalid("TRIP_CACHE_TTL_SECS", e))?;
            cache.ttl = Duration::from_secs(secs);
        }

        Ok(Self {
            bind_addr,
            agent,
            mock_data: get("TRIP_MOCK_DATA").map(PathBuf::from),
            static_dir: get("TRIP_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            scoring: ScoringConfig::default().with_distance(distance),
            cache,
        })
    }
}
