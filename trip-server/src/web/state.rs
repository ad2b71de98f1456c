//! Application state for the web layer.

use std::sync::Arc;

use crate::agent::TripAgent;
use crate::scoring::ScoringConfig;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Planning agent (usually cached, with mock fallback)
    pub agent: Arc<dyn TripAgent>,

    /// Scoring configuration
    pub scoring: Arc<ScoringConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(agent: Arc<dyn TripAgent>, scoring: ScoringConfig) -> Self {
        Self {
            agent,
            scoring: Arc::new(scoring),
        }
    }
}
