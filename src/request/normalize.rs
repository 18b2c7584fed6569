//! Failure normalization: every raw transport failure becomes one uniform
//! [`ApiError`] before it reaches channel state.
//!
//! Message precedence: server-provided envelope message, then the transport
//! error's own display, then the per-operation fallback (e.g. "Failed to
//! fetch users"). Never panics, always yields a non-empty message.

use serde::Deserialize;

use crate::domain::{ApiError, ErrorKind};
use crate::transport::TransportError;

/// Message the server attaches to a 403 when the signed-in admin account has
/// been blocked. Matching it forces a client-side logout.
pub const BLOCKED_ACCOUNT_MESSAGE: &str = "Your account has been blocked";

/// Error envelope returned by every endpoint on a non-2xx response.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    message: String,
}

/// Converts a transport failure into the uniform error shape.
///
/// `fallback` is the operation-specific message used when the failure carries
/// nothing better.
#[must_use]
pub fn normalize(raw: &TransportError, fallback: &str) -> ApiError {
    match raw {
        TransportError::Network(detail) => {
            let message = if detail.is_empty() {
                fallback.to_string()
            } else {
                detail.clone()
            };
            ApiError::new(ErrorKind::Network, message)
        }
        TransportError::Status { status, body } => normalize_status(*status, body, fallback),
        TransportError::Decode(detail) => {
            tracing::debug!(detail = %detail, "undecodable response body");
            ApiError::new(ErrorKind::Unexpected, fallback)
        }
    }
}

fn normalize_status(status: u16, body: &str, fallback: &str) -> ApiError {
    let server_message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.message)
        .filter(|message| !message.is_empty());

    match server_message {
        Some(message) if status == 403 && message == BLOCKED_ACCOUNT_MESSAGE => {
            ApiError::new(ErrorKind::Blocked, message)
        }
        Some(message) => ApiError::new(ErrorKind::Rejected, message),
        None => {
            tracing::debug!(status, "non-2xx response without a message envelope");
            ApiError::new(ErrorKind::Rejected, fallback)
        }
    }
}
