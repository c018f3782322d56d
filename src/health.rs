//! `GET /health` endpoint handler.
//!
//! Returns a [`HealthResponse`] JSON payload with the service status,
//! the current time, and the deployment mode string. The route sits
//! outside the `/api` subtree, so it is never rate limited.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::server::AppState;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub environment: String,
}

pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        environment: state.settings.environment.clone(),
    })
}
