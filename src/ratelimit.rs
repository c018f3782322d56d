//! Fixed-window rate limiting keyed by client IP.
//!
//! [`RateLimitStore`] is the injectable counting backend; the in-process
//! [`InMemoryStore`] keeps one [`Window`] per client key behind a mutex so
//! concurrent arrivals from the same key increment-and-check atomically.
//! [`limit_by_ip`] is the Axum middleware applied to the `/api` subtree.
//! Denials carry the standard `RateLimit-*` response headers (no legacy
//! `X-RateLimit-*` variants) plus `Retry-After`.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

// tokio's clock rather than std so tests can run windows on paused time
use tokio::time::Instant;

use async_trait::async_trait;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::server::AppState;

/// Outcome of counting one request against a client key's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Time until the current window resets.
    pub reset_after: Duration,
}

/// Counting backend for the limiter. Kept as a trait so the in-memory
/// store can be swapped for a shared one (e.g. Redis) in multi-instance
/// deployments without touching the middleware.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Record one request for `key` and decide whether it may proceed.
    async fn check(&self, key: IpAddr) -> Decision;
}

#[derive(Debug)]
struct Window {
    count: u32,
    started_at: Instant,
}

/// Fixed-window counters held in process memory.
#[derive(Debug)]
pub struct InMemoryStore {
    windows: Mutex<HashMap<IpAddr, Window>>,
    limit: u32,
    window: Duration,
}

impl InMemoryStore {
    #[must_use]
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            limit,
            window,
        }
    }
}

#[async_trait]
impl RateLimitStore for InMemoryStore {
    async fn check(&self, key: IpAddr) -> Decision {
        let now = Instant::now();
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Expired windows are dropped on the way in, so idle clients
        // never accumulate in the map.
        windows.retain(|_, w| now.duration_since(w.started_at) < self.window);

        let w = windows.entry(key).or_insert(Window {
            count: 0,
            started_at: now,
        });
        w.count = w.count.saturating_add(1);

        Decision {
            allowed: w.count <= self.limit,
            limit: self.limit,
            remaining: self.limit.saturating_sub(w.count),
            reset_after: self.window.saturating_sub(now.duration_since(w.started_at)),
        }
    }
}

/// Middleware gating every request under the configured API prefix.
pub async fn limit_by_ip(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let decision = state.rate_limiter.check(addr.ip()).await;

    if !decision.allowed {
        tracing::warn!(client = %addr.ip(), "rate limit exceeded");
        let mut response = (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "message": "Too many requests from this IP" })),
        )
            .into_response();
        set_ratelimit_headers(&mut response, &decision);
        response.headers_mut().insert(
            header::RETRY_AFTER,
            HeaderValue::from(decision.reset_after.as_secs().max(1)),
        );
        return response;
    }

    let mut response = next.run(request).await;
    set_ratelimit_headers(&mut response, &decision);
    response
}

fn set_ratelimit_headers(response: &mut Response, decision: &Decision) {
    let headers = response.headers_mut();
    headers.insert("ratelimit-limit", HeaderValue::from(decision.limit));
    headers.insert("ratelimit-remaining", HeaderValue::from(decision.remaining));
    headers.insert(
        "ratelimit-reset",
        HeaderValue::from(decision.reset_after.as_secs()),
    );
}
