//! Axum router setup, shared application state, and graceful shutdown.
//!
//! Contains [`AppState`] (the `Arc`-shared settings and rate-limit
//! store), [`build_router`] for constructing the router with its
//! middleware layers, [`handle_panic`] for the opaque 500 boundary, and
//! [`shutdown_signal`] for SIGTERM / Ctrl+C handling.

use std::sync::Arc;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::Settings;
use crate::health::health_handler;
use crate::ratelimit::{self, RateLimitStore};

/// Request bodies above this are rejected before they reach a handler.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub struct AppState {
    pub settings: Settings,
    pub rate_limiter: Arc<dyn RateLimitStore>,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    // Only the /api subtree is rate limited; /health stays reachable
    // for probes even when a client has exhausted its window.
    let api = Router::new()
        .route("/customers", post(api::create_customer))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            ratelimit::limit_by_ip,
        ));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        .fallback(api::not_found)
        .layer(
            // Security headers sit outside the panic boundary so even
            // fabricated 500s carry them.
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("DENY"),
                ))
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

/// Converts a handler panic into the opaque 500 body. The panic detail
/// is logged, never sent to the caller.
pub fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(detail, "request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Something went wrong!" })),
    )
        .into_response()
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
