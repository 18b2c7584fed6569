//! The engine aggregate: one state block per domain, operations as async
//! methods.
//!
//! # Architecture
//!
//! [`Engine`] owns every request channel and cached collection behind
//! `RefCell`s and is itself shared as an `Rc`. Operations follow one
//! discipline:
//!
//! 1. borrow the state block, `begin()` the channel, drop the borrow;
//! 2. await the transport call (no borrow held across the await, so
//!    concurrent dispatches to the same channel are allowed);
//! 3. re-borrow and `resolve`/`reject` with the ticket from step 1; the
//!    sequence-guard discards whatever became stale in the meantime.
//!
//! Timers (debounce, ephemeral feedback) are `tokio::task::spawn_local`
//! tasks holding a clone of the `Rc`, guarded by the generation tickets in
//! [`crate::timing`]. Operations that schedule timers take `self: Rc<Self>`
//! so the countdown can outlive the call, and must run inside a
//! `tokio::task::LocalSet` on a current-thread runtime.

pub mod categories;
pub mod courses;
pub mod enrollment;
pub mod session;
pub mod suggestions;
pub mod users;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures_util::future;

use crate::domain::ApiError;
use crate::transport::{AdminApi, TokenStore};

pub use categories::CategoriesState;
pub use courses::CoursesState;
pub use enrollment::EnrollmentState;
pub use session::{AdminSession, SessionState};
pub use suggestions::SearchState;
pub use users::UsersState;

/// Tunable timings and defaults.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Quiet period before a type-ahead query is dispatched.
    pub debounce_window: Duration,

    /// How long ephemeral success feedback stays raised.
    pub feedback_ttl: Duration,

    /// Page size used when the engine fetches a listing on its own behalf
    /// (e.g. the full-listing fallback of the suggestion search).
    pub listing_limit: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce_window: Duration::from_millis(300),
            feedback_ttl: Duration::from_millis(3000),
            listing_limit: 10,
        }
    }
}

/// Central state container for the admin console.
///
/// Each domain block is exclusively owned by its `RefCell`; no two components
/// mutate the same channel concurrently. Concurrent *dispatches* are resolved
/// by the sequence-guard, not by locking.
pub struct Engine {
    api: Rc<dyn AdminApi>,
    tokens: Rc<dyn TokenStore>,
    config: EngineConfig,

    /// Login lifecycle and forced-logout flag.
    pub session: RefCell<SessionState>,

    /// Paged user listing and the block/unblock mutation.
    pub users: RefCell<UsersState>,

    /// Category collection and its four mutation channels.
    pub categories: RefCell<CategoriesState>,

    /// Course listing for the enrollment form.
    pub courses: RefCell<CoursesState>,

    /// Manual enrollment submission.
    pub enrollment: RefCell<EnrollmentState>,

    /// Debounced user type-ahead for the enrollment form.
    pub search: RefCell<SearchState>,
}

impl Engine {
    /// Creates an engine over the given transport and token ports.
    pub fn new(
        api: Rc<dyn AdminApi>,
        tokens: Rc<dyn TokenStore>,
        config: EngineConfig,
    ) -> Rc<Self> {
        Rc::new(Self {
            api,
            tokens,
            config,
            session: RefCell::new(SessionState::default()),
            users: RefCell::new(UsersState::default()),
            categories: RefCell::new(CategoriesState::default()),
            courses: RefCell::new(CoursesState::default()),
            enrollment: RefCell::new(EnrollmentState::default()),
            search: RefCell::new(SearchState::default()),
        })
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Fetches the initial dashboard data: first user page, categories and
    /// courses, concurrently. Each fetch fails or succeeds on its own
    /// channel; this method itself cannot fail.
    pub async fn bootstrap(&self) {
        tracing::debug!("bootstrapping dashboard state");
        future::join3(
            self.fetch_users_page(1, self.config.listing_limit),
            self.fetch_categories(),
            self.fetch_courses(),
        )
        .await;
    }

    /// Cross-cutting failure hook, called with every normalized error before
    /// it is stored on a channel.
    ///
    /// The blocked-account rejection is the one global side effect: the
    /// persisted token is cleared and the session flags a forced logout, in
    /// addition to the ordinary channel failure the caller records.
    ///
    /// Runs even when the channel reject is discarded as stale: the server
    /// said the account is blocked, and that fact does not age out with the
    /// dispatch that surfaced it. Only the per-channel error is subject to
    /// the sequence-guard.
    pub(crate) fn note_failure(&self, error: &ApiError) {
        if error.is_blocked() {
            tracing::warn!("admin account blocked by server, forcing logout");
            self.tokens.clear();
            self.session.borrow_mut().forced_logout = true;
        }
    }
}
