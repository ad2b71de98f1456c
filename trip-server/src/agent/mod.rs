//! Planning agent client.
//!
//! The agent is the remote service that interprets a free-text trip request,
//! searches for candidate trips, and handles bookings. This module provides:
//!
//! - an HTTP client for the agent's JSON API
//! - a mock agent serving static candidates, for running without one
//! - a fallback wrapper that serves mock data when the agent is unavailable
//!
//! All of them implement [`TripAgent`].

mod client;
mod error;
mod fallback;
mod mock;
mod provider;
mod types;

pub use client::{AgentClient, AgentConfig};
pub use error::AgentError;
pub use fallback::FallbackAgent;
pub use mock::{MOCK_USER, MockAgent, default_candidates};
pub use provider::TripAgent;
pub use types::{
    BookingRequest, BookingResponse, ChatRequest, ChatResponse, ItineraryResponse, Query,
};
