//! Wire types for the planning agent API.
//!
//! Field names match the agent's JSON (snake_case).

use serde::{Deserialize, Serialize};

use crate::domain::{Candidate, Preferences};

/// A structured trip query, as understood by the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depart_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrive_time: Option<String>,
    pub preferences: Preferences,
}

/// Free-text planning request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub text: String,
    pub prefs: Preferences,
}

/// The agent's answer to a planning request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// How the agent interpreted the request
    pub query: Query,

    /// Candidate trips, in the agent's order
    pub candidates: Vec<Candidate>,

    /// Index into `candidates` of the agent's pick
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<usize>,
}

/// Request to book a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub option: Candidate,
    pub user: String,
}

/// Result of a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingResponse {
    pub booking_id: String,
    pub status: String,
}

/// A stored booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryResponse {
    pub booking_id: String,
    pub status: String,
    pub option: Candidate,
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booked_at: Option<String>,
}
