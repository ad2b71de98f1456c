//! The planning agent abstraction.

use futures::FutureExt;
use futures::future::BoxFuture;

use super::client::AgentClient;
use super::error::AgentError;
use super::types::{BookingRequest, BookingResponse, ChatRequest, ChatResponse, ItineraryResponse};

/// Trait for talking to a planning agent.
///
/// This abstraction lets the web layer run against the remote agent, the
/// built-in mock, or a cached or fallback wrapper around either. It returns
/// boxed futures so it can be used as `Arc<dyn TripAgent>`.
pub trait TripAgent: Send + Sync {
    /// Plan a trip from free text.
    fn chat<'a>(
        &'a self,
        request: &'a ChatRequest,
    ) -> BoxFuture<'a, Result<ChatResponse, AgentError>>;

    /// Book a candidate.
    fn book<'a>(
        &'a self,
        request: &'a BookingRequest,
    ) -> BoxFuture<'a, Result<BookingResponse, AgentError>>;

    /// Fetch a stored booking.
    fn itinerary<'a>(
        &'a self,
        booking_id: &'a str,
    ) -> BoxFuture<'a, Result<ItineraryResponse, AgentError>>;
}

impl TripAgent for AgentClient {
    fn chat<'a>(
        &'a self,
        request: &'a ChatRequest,
    ) -> BoxFuture<'a, Result<ChatResponse, AgentError>> {
        AgentClient::chat(self, request).boxed()
    }

    fn book<'a>(
        &'a self,
        request: &'a BookingRequest,
    ) -> BoxFuture<'a, Result<BookingResponse, AgentError>> {
        AgentClient::book(self, request).boxed()
    }

    fn itinerary<'a>(
        &'a self,
        booking_id: &'a str,
    ) -> BoxFuture<'a, Result<ItineraryResponse, AgentError>> {
        AgentClient::itinerary(self, booking_id).boxed()
    }
}
