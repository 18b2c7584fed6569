//! Named asynchronous request lifecycles with stale-response discard.
//!
//! A [`RequestChannel`] tracks one logical operation slot (e.g. "list users",
//! "create category"). Each dispatch calls [`RequestChannel::begin`], which
//! strictly increments the channel's sequence counter and hands the caller a
//! [`Sequence`] ticket. The eventual response is applied through
//! [`RequestChannel::resolve`] or [`RequestChannel::reject`] **with that
//! ticket**; a ticket that no longer matches the channel's current sequence
//! is discarded as stale. The counter is the only mutable cell involved;
//! responses are compared before they are applied, so correctness does not
//! depend on call-stack timing or transport ordering.
//!
//! This is the sole ordering discipline in the engine: no global ordering
//! across different channels is guaranteed or required.

use crate::domain::ApiError;

/// Lifecycle phase of a request channel.
///
/// `Succeeded` and `Failed` are re-enterable: any channel can be restarted
/// with a new [`RequestChannel::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    /// No dispatch has happened yet.
    #[default]
    Idle,

    /// A dispatch is in flight.
    Pending,

    /// The latest dispatch resolved.
    Succeeded,

    /// The latest dispatch was rejected.
    Failed,
}

/// Ticket identifying one dispatch on one channel.
///
/// Deliberately opaque and non-forgeable outside this module so a response
/// can only be applied with the ticket its dispatch was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequence(u64);

impl Sequence {
    /// Raw counter value, for log correlation.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A named asynchronous operation slot with its own lifecycle and sequence
/// counter.
#[derive(Debug)]
pub struct RequestChannel<T> {
    status: RequestStatus,
    data: Option<T>,
    error: Option<ApiError>,
    sequence: u64,
}

// Manual impl: an idle channel holds no data, so `T` need not be `Default`.
impl<T> Default for RequestChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RequestChannel<T> {
    /// Creates an idle channel with no data, no error, sequence 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: RequestStatus::Idle,
            data: None,
            error: None,
            sequence: 0,
        }
    }

    /// Starts a new dispatch: increments the sequence, moves to Pending and
    /// clears any previous error. Data from an earlier success is kept so
    /// stale content stays visible while the refresh is in flight.
    pub fn begin(&mut self) -> Sequence {
        self.sequence += 1;
        self.status = RequestStatus::Pending;
        self.error = None;
        Sequence(self.sequence)
    }

    /// Applies a successful response, unless it is stale.
    ///
    /// Returns `true` when the response was accepted (the ticket matches the
    /// channel's current sequence). A stale response is dropped without
    /// touching status, data or error.
    pub fn resolve(&mut self, seq: Sequence, data: T) -> bool {
        if seq.0 != self.sequence {
            tracing::debug!(
                stale = seq.0,
                current = self.sequence,
                "discarding stale resolve"
            );
            return false;
        }
        self.status = RequestStatus::Succeeded;
        self.data = Some(data);
        self.error = None;
        true
    }

    /// Applies a failure, unless it is stale.
    ///
    /// Stale failures are dropped exactly like stale successes: an error
    /// arriving after a newer dispatch has begun is invisible. On match the
    /// previous data is left in place (stale content remains visible,
    /// annotated with the error).
    pub fn reject(&mut self, seq: Sequence, error: ApiError) -> bool {
        if seq.0 != self.sequence {
            tracing::debug!(
                stale = seq.0,
                current = self.sequence,
                error = %error,
                "discarding stale reject"
            );
            return false;
        }
        self.status = RequestStatus::Failed;
        self.error = Some(error);
        true
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// Whether a dispatch is currently in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Data from the most recent accepted success, if any.
    #[must_use]
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Mutable access to the held data, for in-place reconciliation
    /// (optimistic merges).
    pub fn data_mut(&mut self) -> Option<&mut T> {
        self.data.as_mut()
    }

    /// Error from the most recent accepted failure, cleared on `begin`.
    #[must_use]
    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }
}
