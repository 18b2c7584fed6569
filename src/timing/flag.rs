//! Ephemeral success flags with supersedable expiry.
//!
//! An [`EphemeralFlag`] backs the transient "created!" style feedback shown
//! after a successful mutation. Raising it hands back a ticket; the engine
//! pairs the ticket with a countdown (3000 ms in the stock config) and calls
//! [`EphemeralFlag::expire`] when the countdown ends. Raising again before
//! expiry supersedes the earlier ticket, so there is at most one live
//! countdown per flag and the reset lands one full delay after the *latest*
//! raise. [`EphemeralFlag::cancel`] invalidates pending expiries when the
//! owning view tears down.

/// Ticket for one pending expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagTicket(u64);

/// A boolean with a self-expiring, cancellable reset timer.
#[derive(Debug, Default)]
pub struct EphemeralFlag {
    value: bool,
    generation: u64,
}

impl EphemeralFlag {
    /// Creates a lowered flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value.
    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.value
    }

    /// Raises the flag and supersedes any pending expiry.
    pub fn raise(&mut self) -> FlagTicket {
        self.value = true;
        self.generation += 1;
        FlagTicket(self.generation)
    }

    /// Lowers the flag if the ticket's countdown is still the live one.
    ///
    /// Returns `true` when the flag was lowered. A superseded or cancelled
    /// ticket is a no-op.
    pub fn expire(&mut self, ticket: FlagTicket) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        self.value = false;
        true
    }

    /// Lowers the flag immediately (new mutation starting) and invalidates
    /// any pending expiry.
    pub fn clear(&mut self) {
        self.value = false;
        self.generation += 1;
    }

    /// Invalidates pending expiries without changing the value. Used on view
    /// teardown so a countdown that is already sleeping cannot fire late.
    pub fn cancel(&mut self) {
        self.generation += 1;
    }
}
