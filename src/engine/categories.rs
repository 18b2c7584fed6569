//! Categories store: listing, create, detail, update, and the soft-delete
//! toggle.

use std::rc::Rc;

use crate::domain::{merge_by_key, Category, CategoryDraft};
use crate::request::{normalize, RequestChannel};
use crate::timing::EphemeralFlag;

use super::Engine;

const FETCH_CATEGORIES: &str = "Failed to fetch categories";
const CREATE_CATEGORY: &str = "Failed to create category";
const FETCH_CATEGORY: &str = "Failed to fetch category";
const UPDATE_CATEGORY: &str = "Failed to update category";
const TOGGLE_CATEGORY: &str = "Failed to update category status";

/// Categories state block.
#[derive(Debug, Default)]
pub struct CategoriesState {
    /// Unpaged category listing (the endpoint returns all of them).
    pub list: RequestChannel<Vec<Category>>,

    /// Create lifecycle; data is the created category as confirmed.
    pub add: RequestChannel<Category>,

    /// Detail lifecycle; data is the singleton "current category" slot.
    /// Last accepted resolve wins regardless of identity.
    pub detail: RequestChannel<Category>,

    /// Update lifecycle; data is the updated category as confirmed. The
    /// cached listing is *not* reconciled here; callers refetch or
    /// navigate.
    pub update: RequestChannel<Category>,

    /// Soft-delete/restore toggle lifecycle.
    pub remove: RequestChannel<()>,

    /// Ephemeral "category created" feedback.
    pub created: EphemeralFlag,
}

impl Engine {
    /// Fetches the full category listing, replacing the cache wholesale.
    pub async fn fetch_categories(&self) {
        let seq = self.categories.borrow_mut().list.begin();
        tracing::debug!(seq = seq.value(), "fetching categories");

        match self.api.list_categories().await {
            Ok(body) => {
                let mut categories = self.categories.borrow_mut();
                if categories.list.resolve(seq, body.categories) {
                    tracing::debug!("category listing replaced");
                }
            }
            Err(raw) => {
                let error = normalize(&raw, FETCH_CATEGORIES);
                self.note_failure(&error);
                self.categories.borrow_mut().list.reject(seq, error);
            }
        }
    }

    /// Creates a category.
    ///
    /// Success raises the ephemeral "created" feedback for the configured
    /// TTL. The new entity is deliberately not appended to the cached
    /// listing: listing truth comes from a fetch, and refresh is the
    /// caller's concern.
    pub async fn create_category(self: Rc<Self>, draft: CategoryDraft) {
        let seq = {
            let mut categories = self.categories.borrow_mut();
            categories.created.clear();
            categories.add.begin()
        };
        tracing::debug!(name = %draft.name, seq = seq.value(), "creating category");

        match self.api.create_category(&draft).await {
            Ok(body) => {
                let ticket = {
                    let mut categories = self.categories.borrow_mut();
                    if !categories.add.resolve(seq, body.category) {
                        return;
                    }
                    categories.created.raise()
                };
                tracing::debug!("category created");

                let engine = Rc::clone(&self);
                tokio::task::spawn_local(async move {
                    tokio::time::sleep(engine.config.feedback_ttl).await;
                    engine.categories.borrow_mut().created.expire(ticket);
                });
            }
            Err(raw) => {
                let error = normalize(&raw, CREATE_CATEGORY);
                self.note_failure(&error);
                self.categories.borrow_mut().add.reject(seq, error);
            }
        }
    }

    /// Fetches one category into the detail slot.
    ///
    /// The slot is overwritten whatever it held before; of overlapping
    /// fetches, the one begun last wins via the sequence-guard.
    pub async fn fetch_category(&self, id: &str) {
        let seq = self.categories.borrow_mut().detail.begin();
        tracing::debug!(id, seq = seq.value(), "fetching category detail");

        match self.api.get_category(id).await {
            Ok(category) => {
                self.categories.borrow_mut().detail.resolve(seq, category);
            }
            Err(raw) => {
                let error = normalize(&raw, FETCH_CATEGORY);
                self.note_failure(&error);
                self.categories.borrow_mut().detail.reject(seq, error);
            }
        }
    }

    /// Updates a category.
    ///
    /// Success signals on the update channel only; the cached listing is not
    /// reconciled automatically (callers trigger a refetch or navigate).
    pub async fn update_category(&self, id: &str, draft: CategoryDraft) {
        let seq = self.categories.borrow_mut().update.begin();
        tracing::debug!(id, seq = seq.value(), "updating category");

        match self.api.update_category(id, &draft).await {
            Ok(body) => {
                let mut categories = self.categories.borrow_mut();
                if categories.update.resolve(seq, body.category) {
                    tracing::debug!(id, "category updated");
                }
            }
            Err(raw) => {
                let error = normalize(&raw, UPDATE_CATEGORY);
                self.note_failure(&error);
                self.categories.borrow_mut().update.reject(seq, error);
            }
        }
    }

    /// Soft-deletes or restores a category.
    ///
    /// The server-confirmed fields are merged into the cached listing by id;
    /// a category not present in the cache is a silent no-op.
    pub async fn set_category_deleted(&self, id: &str, deleted: bool) {
        let seq = self.categories.borrow_mut().remove.begin();
        tracing::debug!(id, deleted, seq = seq.value(), "toggling category deletion");

        match self.api.set_category_deleted(id, deleted).await {
            Ok(body) => {
                let mut categories = self.categories.borrow_mut();
                if categories.remove.resolve(seq, ()) {
                    let confirmed = body.category;
                    if let Some(items) = categories.list.data_mut() {
                        merge_by_key(items, &confirmed.id, |category| {
                            category.is_deleted = confirmed.is_deleted;
                            category.name = confirmed.name.clone();
                            category.description = confirmed.description.clone();
                        });
                    }
                }
            }
            Err(raw) => {
                let error = normalize(&raw, TOGGLE_CATEGORY);
                self.note_failure(&error);
                self.categories.borrow_mut().remove.reject(seq, error);
            }
        }
    }

    /// Invalidates the pending "created" feedback countdown on view
    /// teardown.
    pub fn cancel_category_feedback(&self) {
        self.categories.borrow_mut().created.cancel();
    }
}
