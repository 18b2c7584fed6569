//! Error types for the Courseboard engine.
//!
//! This module defines the single normalized error shape [`ApiError`] that
//! request channels store, and a type alias [`Result`] for convenient error
//! handling throughout the engine. Raw transport failures never reach state;
//! they are funneled through [`crate::request::normalize`] first.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse classification of a normalized failure.
///
/// The UI surfaces every kind identically as a channel error message. The one
/// kind callers pattern-match on is [`ErrorKind::Blocked`], which additionally
/// triggers a forced client-side logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Transport/network failure; no response was received.
    Network,

    /// Domain rejection: the server returned a structured message
    /// (validation, not-found, conflict).
    Rejected,

    /// Authorization failure: a 403 whose message matches the
    /// account-blocked sentinel.
    Blocked,

    /// Unrecognized error shape.
    Unexpected,
}

/// The uniform failure value stored on a failed request channel.
///
/// Produced exclusively by [`crate::request::normalize`]; constructing one by
/// hand elsewhere bypasses the blocked-account special case.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ApiError {
    /// Failure classification, see [`ErrorKind`].
    pub kind: ErrorKind,

    /// Human-readable message, already resolved against the per-operation
    /// fallback. Never empty.
    pub message: String,
}

impl ApiError {
    /// Creates an error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Whether this failure must trigger the global forced-logout side effect.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.kind == ErrorKind::Blocked
    }
}

/// A specialized `Result` type for engine operations.
pub type Result<T> = std::result::Result<T, ApiError>;
