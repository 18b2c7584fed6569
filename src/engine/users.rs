//! Users store: paged listing and the block/unblock mutation.

use crate::domain::{PagedCollection, User};
use crate::request::{normalize, RequestChannel};

use super::Engine;

const FETCH_USERS: &str = "Failed to fetch users";
const BLOCK_USER: &str = "Failed to update user status";

/// Users state block.
#[derive(Debug, Default)]
pub struct UsersState {
    /// Paged listing; data is the canonical loaded page.
    pub list: RequestChannel<PagedCollection<User>>,

    /// Block/unblock mutation lifecycle. The confirmation is merged into the
    /// listing rather than stored here.
    pub block: RequestChannel<()>,
}

impl Engine {
    /// Fetches one page of the user listing.
    ///
    /// Success replaces the cached page wholesale (a page boundary changed,
    /// so merging would be wrong). Failure leaves the previous page visible,
    /// annotated with the channel error.
    pub async fn fetch_users_page(&self, page: u32, limit: u32) {
        let seq = self.users.borrow_mut().list.begin();
        tracing::debug!(page, limit, seq = seq.value(), "fetching user page");

        match self.api.list_users(page, limit).await {
            Ok(body) => {
                let collection =
                    PagedCollection::new(body.users, body.page, body.limit, body.total);
                let mut users = self.users.borrow_mut();
                if users.list.resolve(seq, collection) {
                    tracing::debug!(page, "user page replaced");
                }
            }
            Err(raw) => {
                let error = normalize(&raw, FETCH_USERS);
                self.note_failure(&error);
                self.users.borrow_mut().list.reject(seq, error);
            }
        }
    }

    /// Toggles a user's blocked state.
    ///
    /// Only the server-confirmed `isBlocked` value is merged into the loaded
    /// page, by id; client-side optimism is never applied before
    /// confirmation. A target outside the loaded page is a silent no-op.
    pub async fn toggle_user_block(&self, id: &str) {
        let seq = self.users.borrow_mut().block.begin();
        tracing::debug!(id, seq = seq.value(), "toggling user block state");

        match self.api.toggle_user_block(id).await {
            Ok(body) => {
                let mut users = self.users.borrow_mut();
                if users.block.resolve(seq, ()) {
                    if let Some(page) = users.list.data_mut() {
                        page.merge(&body.id, |user| user.is_blocked = body.is_blocked);
                    }
                    tracing::debug!(id = %body.id, is_blocked = body.is_blocked, "block state confirmed");
                }
            }
            Err(raw) => {
                let error = normalize(&raw, BLOCK_USER);
                self.note_failure(&error);
                self.users.borrow_mut().block.reject(seq, error);
            }
        }
    }
}
