//! Sliding-window rate limiting with a permanent block list
//!
//! Tracks request timestamps per client identifier inside a trailing window.
//! Entries are created lazily on a client's first request and pruned lazily
//! on each subsequent access; there is no background sweep.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

/// Time source for the limiter
///
/// Injectable so tests can drive a manual clock instead of waiting out real
/// windows.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Production clock backed by `Instant::now()`
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Outcome of a rate-limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// Request admitted and recorded against the client's window
    Allowed,
    /// Client is on the permanent block list
    Blocked,
    /// Client exhausted its window; the attempt is not recorded
    RateLimited,
}

/// Per-client sliding-window request counter and permanent block list
///
/// The purge-check-append sequence for a client's window runs under a single
/// lock, so two concurrent requests from the same client cannot both observe
/// a stale below-limit count.
pub struct RateLimiter {
    windows: Mutex<HashMap<String, Vec<Instant>>>,
    blocked: RwLock<HashSet<String>>,
    max_requests: usize,
    window: Duration,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    /// Create a limiter with the system clock
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self::with_clock(max_requests, window, Arc::new(SystemClock))
    }

    /// Create a limiter with an injected time source
    pub fn with_clock(max_requests: usize, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            blocked: RwLock::new(HashSet::new()),
            max_requests,
            window,
            clock,
        }
    }

    /// Check whether a request from `client_id` may proceed
    ///
    /// Blocked clients are denied before any window bookkeeping. Otherwise
    /// stale timestamps are purged; if the remaining count has reached the
    /// limit the attempt is rejected without being recorded, else the current
    /// timestamp is appended and the request admitted.
    pub async fn allow(&self, client_id: &str) -> RateDecision {
        if self.blocked.read().await.contains(client_id) {
            tracing::warn!(client_id, "Request denied: client is blocked");
            return RateDecision::Blocked;
        }

        let now = self.clock.now();
        let mut windows = self.windows.lock().await;
        let entry = windows.entry(client_id.to_string()).or_default();
        entry.retain(|&t| now.saturating_duration_since(t) < self.window);

        if entry.len() >= self.max_requests {
            tracing::warn!(
                client_id,
                requests_in_window = entry.len(),
                max_requests = self.max_requests,
                window_seconds = self.window.as_secs(),
                "Request denied: rate limit exceeded"
            );
            return RateDecision::RateLimited;
        }

        entry.push(now);
        RateDecision::Allowed
    }

    /// Add a client to the permanent block list
    ///
    /// Nothing in this subsystem ever removes an entry; unblocking is an
    /// external operational action.
    pub async fn block(&self, client_id: &str) {
        self.blocked.write().await.insert(client_id.to_string());
        tracing::info!(client_id, "Client added to block list");
    }

    /// Whether a client is on the block list
    pub async fn is_blocked(&self, client_id: &str) -> bool {
        self.blocked.read().await.contains(client_id)
    }
}
