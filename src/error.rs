//! Unified error types for Intake.
//!
//! [`IntakeError`] covers startup and CLI failures; it uses `thiserror`
//! for `Display` and `Error` derives. Request-level failures never pass
//! through here — they are converted to structured JSON responses inside
//! the handlers (see [`api::AppError`](crate::api::AppError)).

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum IntakeError {
    #[error("Invalid setting '{field}': {message}")]
    InvalidSetting {
        field: &'static str,
        message: String,
    },

    #[error("Invalid address: {0}")]
    AddressParse(#[from] std::net::AddrParseError),

    #[error("Invalid URI: {source}")]
    UriParse {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("HTTP request failed: {source}")]
    HttpRequest {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Health check failed with status {0}")]
    HealthCheckFailed(hyper::StatusCode),
}
