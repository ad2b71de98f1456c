//! Caching layer for planning agent responses.
//!
//! Planning a trip is the slow part of a request, and users re-submit the
//! same request while adjusting sort order or weights. We cache chat
//! responses keyed by the request, and itineraries by booking id. Bookings
//! have side effects and are never cached.
//!
//! The cache wraps the remote agent directly and sits below any mock
//! fallback, so a response served during an outage is never cached.

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::agent::{
    AgentError, BookingRequest, BookingResponse, ChatRequest, ChatResponse, ItineraryResponse,
    TripAgent,
};
use crate::domain::Preferences;

/// Cache key for chat responses.
///
/// Text is trimmed and lowercased. Preference floats are compared by bit
/// pattern so the key is `Eq + Hash`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ChatKey {
    text: String,
    weights: [u64; 4],
    max_price: Option<u64>,
    avoid_flights: bool,
}

impl ChatKey {
    fn new(request: &ChatRequest) -> Self {
        let Preferences {
            w_time,
            w_price,
            w_co2,
            w_transfers,
            max_price,
            avoid_flights,
        } = &request.prefs;

        Self {
            text: normalize_text(&request.text),
            weights: [
                w_time.to_bits(),
                w_price.to_bits(),
                w_co2.to_bits(),
                w_transfers.to_bits(),
            ],
            max_price: max_price.map(f64::to_bits),
            avoid_flights: *avoid_flights,
        }
    }
}

/// Collapse whitespace and case so trivially different requests share an entry.
fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries, per cache.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 1000,
        }
    }
}

/// Planning agent with caching.
///
/// Wraps any `TripAgent` and caches chat and itinerary responses.
pub struct CachedAgent {
    agent: Arc<dyn TripAgent>,
    chats: MokaCache<ChatKey, Arc<ChatResponse>>,
    itineraries: MokaCache<String, Arc<ItineraryResponse>>,
}

impl CachedAgent {
    /// Create a new cached agent.
    pub fn new(agent: Arc<dyn TripAgent>, config: &CacheConfig) -> Self {
        let chats = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        let itineraries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            agent,
            chats,
            itineraries,
        }
    }

    async fn cached_chat(&self, request: &ChatRequest) -> Result<ChatResponse, AgentError> {
        let key = ChatKey::new(request);

        // Try cache first
        if let Some(cached) = self.chats.get(&key).await {
            debug!(text = %key.text, "chat cache hit");
            return Ok(cached.as_ref().clone());
        }

        let response = self.agent.chat(request).await?;
        self.chats.insert(key, Arc::new(response.clone())).await;

        Ok(response)
    }

    async fn cached_itinerary(&self, booking_id: &str) -> Result<ItineraryResponse, AgentError> {
        if let Some(cached) = self.itineraries.get(booking_id).await {
            return Ok(cached.as_ref().clone());
        }

        let itinerary = self.agent.itinerary(booking_id).await?;
        self.itineraries
            .insert(booking_id.to_string(), Arc::new(itinerary.clone()))
            .await;

        Ok(itinerary)
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.chats.entry_count() + self.itineraries.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.chats.invalidate_all();
        self.itineraries.invalidate_all();
    }
}

impl TripAgent for CachedAgent {
    fn chat<'a>(
        &'a self,
        request: &'a ChatRequest,
    ) -> BoxFuture<'a, Result<ChatResponse, AgentError>> {
        self.cached_chat(request).boxed()
    }

    fn book<'a>(
        &'a self,
        request: &'a BookingRequest,
    ) -> BoxFuture<'a, Result<BookingResponse, AgentError>> {
        self.agent.book(request)
    }

    fn itinerary<'a>(
        &'a self,
        booking_id: &'a str,
    ) -> BoxFuture<'a, Result<ItineraryResponse, AgentError>> {
        self.cached_itinerary(booking_id).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{FallbackAgent, MockAgent};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Mock agent that counts calls.
    struct CountingAgent {
        inner: MockAgent,
        chats: AtomicUsize,
        itineraries: AtomicUsize,
        bookings: AtomicUsize,
    }

    impl CountingAgent {
        fn new() -> Self {
            Self {
                inner: MockAgent::new(),
                chats: AtomicUsize::new(0),
                itineraries: AtomicUsize::new(0),
                bookings: AtomicUsize::new(0),
            }
        }
    }

    impl TripAgent for CountingAgent {
        fn chat<'a>(
            &'a self,
            request: &'a ChatRequest,
        ) -> BoxFuture<'a, Result<ChatResponse, AgentError>> {
            self.chats.fetch_add(1, Ordering::SeqCst);
            self.inner.chat(request)
        }

        fn book<'a>(
            &'a self,
            request: &'a BookingRequest,
        ) -> BoxFuture<'a, Result<BookingResponse, AgentError>> {
            self.bookings.fetch_add(1, Ordering::SeqCst);
            self.inner.book(request)
        }

        fn itinerary<'a>(
            &'a self,
            booking_id: &'a str,
        ) -> BoxFuture<'a, Result<ItineraryResponse, AgentError>> {
            self.itineraries.fetch_add(1, Ordering::SeqCst);
            self.inner.itinerary(booking_id)
        }
    }

    fn request(text: &str, prefs: Preferences) -> ChatRequest {
        ChatRequest {
            text: text.to_string(),
            prefs,
        }
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(300));
        assert_eq!(config.max_capacity, 1000);
    }

    #[test]
    fn text_normalization() {
        assert_eq!(normalize_text("  Amsterdam   to PARIS "), "amsterdam to paris");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn key_includes_preferences() {
        let a = ChatKey::new(&request("Amsterdam to Paris", Preferences::default()));
        let b = ChatKey::new(&request("amsterdam  to paris", Preferences::default()));
        let c = ChatKey::new(&request("Amsterdam to Paris", Preferences::balanced()));
        let d = ChatKey::new(&request(
            "Amsterdam to Paris",
            Preferences::default().avoiding_flights(),
        ));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[tokio::test]
    async fn repeated_chat_hits_cache() {
        let counting = Arc::new(CountingAgent::new());
        let cached = CachedAgent::new(counting.clone(), &CacheConfig::default());

        let first = cached
            .chat(&request("Amsterdam to Paris", Preferences::default()))
            .await
            .unwrap();
        let second = cached
            .chat(&request("amsterdam to paris", Preferences::default()))
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(counting.chats.load(Ordering::SeqCst), 1);

        // Different weights miss
        cached
            .chat(&request("Amsterdam to Paris", Preferences::balanced()))
            .await
            .unwrap();
        assert_eq!(counting.chats.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn bookings_are_not_cached() {
        let counting = Arc::new(CountingAgent::new());
        let cached = CachedAgent::new(counting.clone(), &CacheConfig::default());
        let booking = BookingRequest {
            option: MockAgent::new().candidates()[0].clone(),
            user: "bob".into(),
        };

        cached.book(&booking).await.unwrap();
        cached.book(&booking).await.unwrap();
        assert_eq!(counting.bookings.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn itinerary_cached_by_id() {
        let counting = Arc::new(CountingAgent::new());
        let cached = CachedAgent::new(counting.clone(), &CacheConfig::default());

        cached.itinerary("b-1").await.unwrap();
        cached.itinerary("b-1").await.unwrap();
        cached.itinerary("b-2").await.unwrap();
        assert_eq!(counting.itineraries.load(Ordering::SeqCst), 2);

        cached.invalidate_cache();
        cached.itinerary("b-1").await.unwrap();
        assert_eq!(counting.itineraries.load(Ordering::SeqCst), 3);
    }

    /// Remote agent that can be taken down and brought back.
    struct OutageAgent {
        down: AtomicBool,
        inner: MockAgent,
    }

    impl OutageAgent {
        fn run<'a, T: Send + 'a>(
            &'a self,
            ok: BoxFuture<'a, Result<T, AgentError>>,
        ) -> BoxFuture<'a, Result<T, AgentError>> {
            if self.down.load(Ordering::SeqCst) {
                async {
                    Err(AgentError::Api {
                        status: 503,
                        message: "unavailable".into(),
                    })
                }
                .boxed()
            } else {
                ok
            }
        }
    }

    impl TripAgent for OutageAgent {
        fn chat<'a>(
            &'a self,
            request: &'a ChatRequest,
        ) -> BoxFuture<'a, Result<ChatResponse, AgentError>> {
            self.run(self.inner.chat(request))
        }

        fn book<'a>(
            &'a self,
            request: &'a BookingRequest,
        ) -> BoxFuture<'a, Result<BookingResponse, AgentError>> {
            self.run(self.inner.book(request))
        }

        fn itinerary<'a>(
            &'a self,
            booking_id: &'a str,
        ) -> BoxFuture<'a, Result<ItineraryResponse, AgentError>> {
            self.run(self.inner.itinerary(booking_id))
        }
    }

    #[tokio::test]
    async fn mock_answers_during_outage_are_not_cached() {
        let remote = Arc::new(OutageAgent {
            down: AtomicBool::new(true),
            inner: MockAgent::with_candidates(vec![MockAgent::new().candidates()[2].clone()]),
        });
        let cached = CachedAgent::new(remote.clone(), &CacheConfig::default());
        let agent = FallbackAgent::new(Some(Arc::new(cached)), MockAgent::new());
        let req = request("Amsterdam to Paris", Preferences::default());

        let during = agent.chat(&req).await.unwrap();
        assert_eq!(during.candidates.len(), 3);
        let invented = agent.itinerary("b-1").await.unwrap();
        assert_eq!(invented.option.id(), Some("mock-1"));

        remote.down.store(false, Ordering::SeqCst);

        let after = agent.chat(&req).await.unwrap();
        assert_eq!(after.candidates.len(), 1);
        assert_eq!(after.candidates[0].id(), Some("mock-3"));
        let real = agent.itinerary("b-1").await.unwrap();
        assert_eq!(real.option.id(), Some("mock-3"));
    }
}
