//! Crate-wide error type and its HTTP response mapping
//!
//! Every handler failure is converted into a JSON payload with an `error`
//! field. The upstream integration is treated as unreliable: nothing is
//! retried, and a transient failure and a permanent rejection share the
//! same shape.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    /// The upstream device listing was rejected; carries the raw upstream
    /// payload so the caller can see what the vendor actually returned.
    #[error("failed to discover devices")]
    DiscoveryFailed { details: Value },

    /// Any other unexpected upstream failure (bad envelope code, malformed
    /// response, non-success status outside discovery).
    #[error("{0}")]
    Upstream(String),

    /// Bad action value or malformed composite device id.
    #[error("{0}")]
    Validation(String),

    /// Transport-level failure talking to the vendor API.
    #[error("Govee API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream payload did not match the expected shape.
    #[error("failed to decode upstream payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Invalid or missing runtime configuration.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            BridgeError::DiscoveryFailed { details } => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": "Failed to discover devices", "details": details }),
            ),
            BridgeError::Validation(message) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": other.to_string() }),
            ),
        };
        (status, Json(body)).into_response()
    }
}
