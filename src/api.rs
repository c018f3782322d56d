//! `POST /api/customers` handler and the JSON error boundary.
//!
//! The handler walks a single path: parse the body into a
//! [`CustomerPayload`], validate it, normalize the accepted record's
//! name to NFC, and echo it back. Validation failures become a 400 with
//! itemized messages; anything unexpected (a body that is not JSON, a
//! panic downstream) surfaces as an opaque 500 via [`AppError`] or the
//! panic boundary in [`server`](crate::server).

use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::customer::{Customer, CustomerPayload};

#[derive(Serialize, Deserialize)]
pub struct CreateCustomerResponse {
    pub message: String,
    pub customer: Customer,
}

#[derive(Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<String>,
}

/// Failures that escape the handler. All of them are logged server-side
/// and rendered as the same opaque 500 body, never leaking detail.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("request body is not valid JSON: {0}")]
    BodyParse(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request processing failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Something went wrong!" })),
        )
            .into_response()
    }
}

pub async fn create_customer(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let correlation_id = headers
        .get("x-correlation-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), String::from);

    // An absent body reads as an empty record, matching form-style clients
    let payload: CustomerPayload = if body.is_empty() {
        CustomerPayload::default()
    } else {
        serde_json::from_slice(&body)?
    };

    let customer = match payload.into_validated() {
        Ok(customer) => customer.normalize(),
        Err(errors) => {
            tracing::info!(
                correlation_id = %correlation_id,
                client = %addr.ip(),
                errors = errors.len(),
                "customer rejected"
            );
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorResponse { errors }),
            )
                .into_response());
        }
    };

    // No persistence in this service; the accepted record is echoed back
    tracing::info!(
        correlation_id = %correlation_id,
        client = %addr.ip(),
        email = %customer.email,
        "customer created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateCustomerResponse {
            message: "Customer created successfully".to_string(),
            customer,
        }),
    )
        .into_response())
}

/// Fallback for every route the router does not know.
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
}
