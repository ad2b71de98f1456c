//! Mock planning agent for running without a remote agent.
//!
//! Serves a fixed candidate set, either the built-in Amsterdam → Paris
//! options or candidates loaded from a JSON file, and keeps recent bookings
//! in memory.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use futures::FutureExt;
use futures::future::BoxFuture;
use moka::future::Cache as MokaCache;

use crate::domain::{Candidate, CandidateRecord, Leg, TransportMode};

use super::error::AgentError;
use super::provider::TripAgent;
use super::types::{
    BookingRequest, BookingResponse, ChatRequest, ChatResponse, ItineraryResponse, Query,
};

/// User attached to mock itineraries that were not booked through this agent.
pub const MOCK_USER: &str = "demo-user";

/// Bookings remembered by a mock agent; older ones are evicted.
const MAX_BOOKINGS: u64 = 1000;

/// Mock agent that serves static candidates.
#[derive(Clone)]
pub struct MockAgent {
    candidates: Arc<Vec<Candidate>>,
    from: String,
    to: String,

    /// Recent bookings made through this agent, keyed by booking id.
    bookings: MokaCache<String, ItineraryResponse>,
    next_booking: Arc<AtomicU64>,
}

impl MockAgent {
    /// Create a mock agent serving the built-in candidates.
    pub fn new() -> Self {
        Self::with_candidates(default_candidates())
    }

    /// Create a mock agent serving the given candidates.
    ///
    /// The query endpoints are taken from the first candidate.
    pub fn with_candidates(candidates: Vec<Candidate>) -> Self {
        let (from, to) = candidates
            .first()
            .map(|c| (city(c.origin()), city(c.destination())))
            .unwrap_or_default();

        Self {
            candidates: Arc::new(candidates),
            from,
            to,
            bookings: MokaCache::new(MAX_BOOKINGS),
            next_booking: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Create a mock agent by loading a JSON array of candidates from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AgentError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|e| AgentError::Api {
            status: 0,
            message: format!("Failed to read {:?}: {}", path, e),
        })?;

        let candidates: Vec<Candidate> =
            serde_json::from_str(&json).map_err(|e| AgentError::Json {
                message: format!("Failed to parse {:?}: {}", path, e),
                body: None,
            })?;

        if candidates.is_empty() {
            return Err(AgentError::Api {
                status: 0,
                message: format!("No mock candidates in {:?}", path),
            });
        }

        Ok(Self::with_candidates(candidates))
    }

    /// The candidates this agent serves.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    async fn plan(&self, request: &ChatRequest) -> Result<ChatResponse, AgentError> {
        Ok(ChatResponse {
            query: Query {
                from: self.from.clone(),
                to: self.to.clone(),
                depart_time: None,
                arrive_time: None,
                preferences: request.prefs.clone(),
            },
            candidates: self.candidates.to_vec(),
            recommendation: Some(0),
        })
    }

    async fn make_booking(&self, request: &BookingRequest) -> Result<BookingResponse, AgentError> {
        let now = Utc::now();
        let seq = self.next_booking.fetch_add(1, Ordering::Relaxed);
        let booking_id = format!("mock-booking-{}-{seq}", now.timestamp_millis());

        let itinerary = ItineraryResponse {
            booking_id: booking_id.clone(),
            status: "confirmed".to_string(),
            option: request.option.clone(),
            user: request.user.clone(),
            booked_at: Some(now.to_rfc3339()),
        };
        self.bookings.insert(booking_id.clone(), itinerary).await;

        Ok(BookingResponse {
            booking_id,
            status: "confirmed".to_string(),
        })
    }

    async fn lookup(&self, booking_id: &str) -> Result<ItineraryResponse, AgentError> {
        if let Some(itinerary) = self.bookings.get(booking_id).await {
            return Ok(itinerary);
        }

        // Unknown ids get a confirmed booking of the first candidate
        let option = self
            .candidates
            .first()
            .cloned()
            .ok_or_else(|| AgentError::NotFound(format!("itinerary {booking_id}")))?;

        Ok(ItineraryResponse {
            booking_id: booking_id.to_string(),
            status: "confirmed".to_string(),
            option,
            user: MOCK_USER.to_string(),
            booked_at: Some(Utc::now().to_rfc3339()),
        })
    }
}

impl Default for MockAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl TripAgent for MockAgent {
    fn chat<'a>(
        &'a self,
        request: &'a ChatRequest,
    ) -> BoxFuture<'a, Result<ChatResponse, AgentError>> {
        self.plan(request).boxed()
    }

    fn book<'a>(
        &'a self,
        request: &'a BookingRequest,
    ) -> BoxFuture<'a, Result<BookingResponse, AgentError>> {
        self.make_booking(request).boxed()
    }

    fn itinerary<'a>(
        &'a self,
        booking_id: &'a str,
    ) -> BoxFuture<'a, Result<ItineraryResponse, AgentError>> {
        self.lookup(booking_id).boxed()
    }
}

/// First word of a station name ("Amsterdam Centraal" → "Amsterdam").
fn city(station: &str) -> String {
    station.split_whitespace().next().unwrap_or(station).to_string()
}

/// The built-in Amsterdam → Paris options.
pub fn default_candidates() -> Vec<Candidate> {
    let records = [
        CandidateRecord {
            id: Some("mock-1".to_string()),
            price_eur: Some(89.0),
            duration_min: Some(207),
            co2_kg: Some(12.5),
            transfers: Some(0),
            score: Some(0.85),
            ..CandidateRecord::new(
                TransportMode::Train,
                vec![
                    Leg::new("Amsterdam Centraal", "Paris Gare du Nord")
                        .with_times("08:25", "11:52")
                        .with_service("Thalys", "9342"),
                ],
            )
        },
        CandidateRecord {
            id: Some("mock-2".to_string()),
            price_eur: Some(125.0),
            duration_min: Some(90),
            co2_kg: Some(85.3),
            transfers: Some(0),
            score: Some(0.72),
            ..CandidateRecord::new(
                TransportMode::Flight,
                vec![
                    Leg::new("Amsterdam Schiphol", "Paris Charles de Gaulle")
                        .with_times("10:15", "11:45")
                        .with_service("Air France", "AF1234"),
                ],
            )
        },
        CandidateRecord {
            id: Some("mock-3".to_string()),
            price_eur: Some(35.0),
            duration_min: Some(855),
            co2_kg: Some(28.4),
            transfers: Some(0),
            score: Some(0.68),
            ..CandidateRecord::new(
                TransportMode::Bus,
                vec![
                    Leg::new("Amsterdam Sloterdijk", "Paris Bercy")
                        .with_times("22:30", "12:45")
                        .with_service("FlixBus", "FB789"),
                ],
            )
        },
    ];

    // The records above satisfy every candidate invariant
    records
        .into_iter()
        .filter_map(|r| Candidate::try_from(r).ok())
        .collect()
}
