//! Timer disciplines: debounce and ephemeral flags.
//!
//! Both types are pure generation counters: the same supersession rule the
//! request channels apply to network responses, applied to elapsed timers.
//! The engine supplies the actual delays with `tokio::time::sleep`.

pub mod debounce;
pub mod flag;

pub use debounce::{DebounceTicket, Debouncer};
pub use flag::{EphemeralFlag, FlagTicket};
