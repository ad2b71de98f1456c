//! Primary agent with mock fallback.
//!
//! Transient failures of the primary (timeouts, connect errors, 429 and 5xx)
//! get one retry before the mock answers. Bookings are never retried, since
//! a repeat could book twice.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use tracing::{debug, warn};

use super::error::AgentError;
use super::mock::MockAgent;
use super::provider::TripAgent;
use super::types::{BookingRequest, BookingResponse, ChatRequest, ChatResponse, ItineraryResponse};

/// Agent that serves mock data whenever the primary agent is missing or fails.
///
/// Without a primary, every request goes to the mock.
pub struct FallbackAgent {
    primary: Option<Arc<dyn TripAgent>>,
    fallback: MockAgent,
}

impl FallbackAgent {
    pub fn new(primary: Option<Arc<dyn TripAgent>>, fallback: MockAgent) -> Self {
        Self { primary, fallback }
    }

    /// Mock-only agent.
    pub fn mock_only(fallback: MockAgent) -> Self {
        Self::new(None, fallback)
    }

    /// Whether a primary agent is configured.
    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }
}

/// Call the primary, retrying once on a transient failure.
async fn with_retry<'a, T>(
    operation: &'static str,
    call: impl Fn() -> BoxFuture<'a, Result<T, AgentError>>,
) -> Result<T, AgentError> {
    match call().await {
        Err(e) if e.is_transient() => {
            debug!(operation, error = %e, "transient agent error, retrying");
            call().await
        }
        result => result,
    }
}

fn log_fallback(operation: &str, err: Option<&AgentError>) {
    match err {
        Some(e) => warn!(operation, error = %e, "agent unavailable, using mock data"),
        None => warn!(operation, "no agent configured, using mock data"),
    }
}

impl TripAgent for FallbackAgent {
    fn chat<'a>(
        &'a self,
        request: &'a ChatRequest,
    ) -> BoxFuture<'a, Result<ChatResponse, AgentError>> {
        async move {
            if let Some(primary) = &self.primary {
                match with_retry("chat", move || primary.chat(request)).await {
                    Ok(resp) => return Ok(resp),
                    Err(e) => log_fallback("chat", Some(&e)),
                }
            } else {
                log_fallback("chat", None);
            }
            self.fallback.chat(request).await
        }
        .boxed()
    }

    fn book<'a>(
        &'a self,
        request: &'a BookingRequest,
    ) -> BoxFuture<'a, Result<BookingResponse, AgentError>> {
        async move {
            if let Some(primary) = &self.primary {
                match primary.book(request).await {
                    Ok(resp) => return Ok(resp),
                    Err(e) => log_fallback("book", Some(&e)),
                }
            } else {
                log_fallback("book", None);
            }
            self.fallback.book(request).await
        }
        .boxed()
    }

    fn itinerary<'a>(
        &'a self,
        booking_id: &'a str,
    ) -> BoxFuture<'a, Result<ItineraryResponse, AgentError>> {
        async move {
            if let Some(primary) = &self.primary {
                match with_retry("itinerary", move || primary.itinerary(booking_id)).await {
                    Ok(resp) => return Ok(resp),
                    Err(e) => log_fallback("itinerary", Some(&e)),
                }
            } else {
                log_fallback("itinerary", None);
            }
            self.fallback.itinerary(booking_id).await
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Preferences;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Agent that fails a set number of times, then answers from one candidate.
    struct FlakyAgent {
        failures_left: AtomicUsize,
        status: u16,
        calls: AtomicUsize,
        inner: MockAgent,
    }

    impl FlakyAgent {
        fn new(failures: usize, status: u16) -> Self {
            Self {
                failures_left: AtomicUsize::new(failures),
                status,
                calls: AtomicUsize::new(0),
                inner: MockAgent::with_candidates(vec![MockAgent::new().candidates()[1].clone()]),
            }
        }

        fn broken() -> Self {
            Self::new(usize::MAX, 503)
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn attempt<'a, T: Send + 'a>(
            &'a self,
            ok: BoxFuture<'a, Result<T, AgentError>>,
        ) -> BoxFuture<'a, Result<T, AgentError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let failing = self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if failing {
                let status = self.status;
                async move {
                    Err(AgentError::Api {
                        status,
                        message: "down".into(),
                    })
                }
                .boxed()
            } else {
                ok
            }
        }
    }

    impl TripAgent for FlakyAgent {
        fn chat<'a>(
            &'a self,
            request: &'a ChatRequest,
        ) -> BoxFuture<'a, Result<ChatResponse, AgentError>> {
            self.attempt(self.inner.chat(request))
        }

        fn book<'a>(
            &'a self,
            request: &'a BookingRequest,
        ) -> BoxFuture<'a, Result<BookingResponse, AgentError>> {
            self.attempt(self.inner.book(request))
        }

        fn itinerary<'a>(
            &'a self,
            booking_id: &'a str,
        ) -> BoxFuture<'a, Result<ItineraryResponse, AgentError>> {
            self.attempt(self.inner.itinerary(booking_id))
        }
    }

    fn chat_request() -> ChatRequest {
        ChatRequest {
            text: "anywhere".into(),
            prefs: Preferences::default(),
        }
    }

    #[tokio::test]
    async fn mock_only_serves_mock() {
        let agent = FallbackAgent::mock_only(MockAgent::new());
        assert!(!agent.has_primary());

        let resp = agent.chat(&chat_request()).await.unwrap();
        assert_eq!(resp.candidates.len(), 3);
    }

    #[tokio::test]
    async fn failing_primary_falls_back() {
        let broken = Arc::new(FlakyAgent::broken());
        let agent = FallbackAgent::new(Some(broken.clone()), MockAgent::new());
        assert!(agent.has_primary());

        let resp = agent.chat(&chat_request()).await.unwrap();
        assert_eq!(resp.candidates.len(), 3);

        let itinerary = agent.itinerary("b-7").await.unwrap();
        assert_eq!(itinerary.booking_id, "b-7");

        // Each 503 is retried once
        assert_eq!(broken.calls(), 4);
    }

    #[tokio::test]
    async fn working_primary_is_preferred() {
        let primary = Arc::new(FlakyAgent::new(0, 503));
        let agent = FallbackAgent::new(Some(primary.clone()), MockAgent::new());

        let resp = agent.chat(&chat_request()).await.unwrap();
        assert_eq!(resp.candidates.len(), 1);
        assert_eq!(resp.candidates[0].id(), Some("mock-2"));
        assert_eq!(primary.calls(), 1);
    }

    #[tokio::test]
    async fn transient_failure_is_retried() {
        let primary = Arc::new(FlakyAgent::new(1, 503));
        let agent = FallbackAgent::new(Some(primary.clone()), MockAgent::new());

        let resp = agent.chat(&chat_request()).await.unwrap();
        assert_eq!(resp.candidates.len(), 1);
        assert_eq!(primary.calls(), 2);
    }

    #[tokio::test]
    async fn permanent_failure_is_not_retried() {
        let primary = Arc::new(FlakyAgent::new(1, 400));
        let agent = FallbackAgent::new(Some(primary.clone()), MockAgent::new());

        let resp = agent.chat(&chat_request()).await.unwrap();
        assert_eq!(resp.candidates.len(), 3);
        assert_eq!(primary.calls(), 1);
    }

    #[tokio::test]
    async fn bookings_are_not_retried() {
        let primary = Arc::new(FlakyAgent::new(1, 503));
        let agent = FallbackAgent::new(Some(primary.clone()), MockAgent::new());
        let request = BookingRequest {
            option: MockAgent::new().candidates()[0].clone(),
            user: "dana".into(),
        };

        let booking = agent.book(&request).await.unwrap();
        assert!(booking.booking_id.starts_with("mock-booking-"));
        assert_eq!(primary.calls(), 1);
    }
}
