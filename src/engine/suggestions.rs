//! Debounced user type-ahead for the enrollment form.
//!
//! The controller coalesces keystrokes behind a 300 ms quiet period, then
//! dispatches to one of two data sources: a non-empty query hits the
//! query-scoped suggestions endpoint, an empty query falls back to page 1 of
//! the users full listing. The visible option list is re-derived from the
//! *current* query on every read, never cached, so a pending reply for a
//! source that is no longer selected cannot leak into the display. Stale
//! suggestion replies are additionally discarded by the channel's
//! sequence-guard.

use std::rc::Rc;

use crate::domain::User;
use crate::request::{normalize, RequestChannel};
use crate::timing::Debouncer;

use super::Engine;

const FETCH_SUGGESTIONS: &str = "Failed to fetch user suggestions";

/// Suggestion search state block.
#[derive(Debug, Default)]
pub struct SearchState {
    /// Current input text, recorded synchronously on every keystroke.
    pub query: String,

    /// Query-scoped suggestion channel; data is the latest non-stale result.
    pub suggestions: RequestChannel<Vec<User>>,

    /// Trailing-edge debounce for keystrokes.
    pub debounce: Debouncer,

    /// Entity picked from the option list; the enrollment form reads this to
    /// populate its submission field by identity.
    pub selection: Option<User>,
}

impl Engine {
    /// Records a keystroke and schedules the debounced dispatch.
    ///
    /// The query is updated synchronously (the input box displays it
    /// immediately); the network dispatch happens only if no further
    /// keystroke arrives within the debounce window.
    pub fn search_input(self: Rc<Self>, text: &str) {
        let ticket = {
            let mut search = self.search.borrow_mut();
            search.query = text.to_string();
            search.debounce.arm()
        };
        tracing::debug!(query = text, "keystroke recorded, debounce armed");

        let engine = Rc::clone(&self);
        let text = text.to_string();
        tokio::task::spawn_local(async move {
            tokio::time::sleep(engine.config.debounce_window).await;
            if !engine.search.borrow().debounce.fires(ticket) {
                return;
            }
            if text.is_empty() {
                // Empty query: the display source is the full listing.
                engine
                    .fetch_users_page(1, engine.config.listing_limit)
                    .await;
            } else {
                engine.fetch_user_suggestions(&text).await;
            }
        });
    }

    /// Dispatches the query-scoped suggestion fetch.
    async fn fetch_user_suggestions(&self, query: &str) {
        let seq = self.search.borrow_mut().suggestions.begin();
        tracing::debug!(query, seq = seq.value(), "fetching user suggestions");

        match self.api.user_suggestions(query).await {
            Ok(body) => {
                self.search
                    .borrow_mut()
                    .suggestions
                    .resolve(seq, body.suggestions);
            }
            Err(raw) => {
                let error = normalize(&raw, FETCH_SUGGESTIONS);
                self.note_failure(&error);
                self.search.borrow_mut().suggestions.reject(seq, error);
            }
        }
    }

    /// The option list to display right now.
    ///
    /// Source selection is re-evaluated on every call: while the query is
    /// non-empty the suggestions channel feeds the list; while it is empty
    /// the users full listing does, if it has ever resolved.
    #[must_use]
    pub fn visible_options(&self) -> Vec<User> {
        let search = self.search.borrow();
        if search.query.is_empty() {
            self.users
                .borrow()
                .list
                .data()
                .map(|page| page.items.clone())
                .unwrap_or_default()
        } else {
            search.suggestions.data().cloned().unwrap_or_default()
        }
    }

    /// Picks an option: clears the query (collapsing back to full-listing
    /// mode), defuses any scheduled dispatch for the abandoned text, and
    /// records the selection.
    pub fn select_suggestion(&self, user: User) {
        let mut search = self.search.borrow_mut();
        search.query.clear();
        search.debounce.cancel();
        tracing::debug!(id = %user.id, "suggestion selected");
        search.selection = Some(user);
    }

    /// The currently selected user, if any.
    #[must_use]
    pub fn selected_user(&self) -> Option<User> {
        self.search.borrow().selection.clone()
    }

    /// Drops the current selection (e.g. after a submitted enrollment).
    pub fn clear_selection(&self) {
        self.search.borrow_mut().selection = None;
    }
}
