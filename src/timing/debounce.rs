//! Trailing-edge debounce discipline.
//!
//! [`Debouncer`] owns no timer itself; it owns the *decision* of whether a
//! timer that just elapsed is still the most recent one. Callers arm it, hold
//! the returned ticket across a delay (the engine uses `tokio::time::sleep`),
//! and consult [`Debouncer::fires`] when the delay ends. Arming again within
//! the window supersedes the earlier ticket, so only the trailing call after
//! a quiet period acts. This keeps the scheduling discipline testable without
//! wall-clock waits.

/// Ticket for one scheduled debounce firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

/// Coalesces rapid repeated triggers into one trailing action.
#[derive(Debug, Default)]
pub struct Debouncer {
    generation: u64,
}

impl Debouncer {
    /// Creates an idle debouncer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a firing, superseding any pending one.
    pub fn arm(&mut self) -> DebounceTicket {
        self.generation += 1;
        DebounceTicket(self.generation)
    }

    /// Whether the ticket is still the most recently armed one.
    #[must_use]
    pub fn fires(&self, ticket: DebounceTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Cancels any pending firing without scheduling a new one.
    pub fn cancel(&mut self) {
        self.generation += 1;
    }
}
