//! Admin session: login, logout, and the forced-logout flag.

use crate::request::{normalize, RequestChannel};

use super::Engine;

const LOGIN_FAILED: &str = "Failed to sign in";

/// Identity of the signed-in admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    /// Key of the admin account.
    pub admin_id: String,
}

/// Session state block.
#[derive(Debug, Default)]
pub struct SessionState {
    /// Login request lifecycle; data is the signed-in identity.
    pub login: RequestChannel<AdminSession>,

    /// Set when a blocked-account rejection forced a client-side logout.
    /// The embedding app reads this to clear its route state.
    pub forced_logout: bool,
}

impl Engine {
    /// Signs the admin in. On success the bearer token is handed to the
    /// token store and the login channel resolves with the admin identity.
    pub async fn login(&self, email: &str, password: &str) {
        let seq = {
            let mut session = self.session.borrow_mut();
            session.forced_logout = false;
            session.login.begin()
        };
        tracing::debug!(seq = seq.value(), "dispatching admin login");

        match self.api.login(email, password).await {
            Ok(body) => {
                let mut session = self.session.borrow_mut();
                if session.login.resolve(
                    seq,
                    AdminSession {
                        admin_id: body.admin_id,
                    },
                ) {
                    self.tokens.set(&body.token);
                    tracing::debug!("admin signed in");
                }
            }
            Err(raw) => {
                let error = normalize(&raw, LOGIN_FAILED);
                self.note_failure(&error);
                self.session.borrow_mut().login.reject(seq, error);
            }
        }
    }

    /// Clears the persisted token and resets the session block.
    pub fn logout(&self) {
        tracing::debug!("admin signed out");
        self.tokens.clear();
        *self.session.borrow_mut() = SessionState::default();
    }

    /// Whether a bearer token is currently persisted.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.tokens.get().is_some()
    }
}
