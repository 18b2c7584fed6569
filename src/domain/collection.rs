//! Keyed collections and the optimistic merge primitive.
//!
//! [`PagedCollection`] is the canonical shape for one fetched page of a
//! listing. Its constructor normalizes inconsistent server data instead of
//! trusting it: items past the page window are truncated and duplicate keys
//! are dropped (first occurrence wins), with a warning either way.
//!
//! [`merge_by_key`] applies a server-confirmed partial update to a cached
//! collection in place, without refetching the page.

use serde::{Deserialize, Serialize};

/// Identity for domain entities: an immutable unique key.
pub trait Keyed {
    /// Returns the entity's unique key (`_id` on the wire).
    fn key(&self) -> &str;
}

/// One page of a server-side listing.
///
/// Invariants, enforced by [`PagedCollection::new`]:
/// - `page >= 1`, `limit >= 1`
/// - `items.len() <= min(limit, total - (page - 1) * limit)` and items is
///   empty when `total` is 0
/// - keys are unique within `items`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedCollection<T> {
    /// Entries of the current page, in server order.
    pub items: Vec<T>,

    /// 1-based page number.
    pub page: u32,

    /// Page size requested from the server.
    pub limit: u32,

    /// Total entries across all pages.
    pub total: u64,
}

impl<T: Keyed> PagedCollection<T> {
    /// Builds a page from a server response, normalizing inconsistent data.
    ///
    /// A well-behaved server never trips the normalization paths; when it
    /// does, the collection is clamped to the documented invariants rather
    /// than propagating the inconsistency into every reader.
    #[must_use]
    pub fn new(items: Vec<T>, page: u32, limit: u32, total: u64) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);

        let mut items = items;
        let mut seen: Vec<String> = Vec::with_capacity(items.len());
        let before = items.len();
        items.retain(|item| {
            // retain visits in order, so the first occurrence wins
            let key = item.key();
            if seen.iter().any(|k| k == key) {
                false
            } else {
                seen.push(key.to_string());
                true
            }
        });
        if items.len() != before {
            tracing::warn!(
                dropped = before - items.len(),
                page,
                "duplicate keys in server page, keeping first occurrences"
            );
        }

        let window = Self::window(page, limit, total);
        if items.len() > window {
            tracing::warn!(
                received = items.len(),
                expected = window,
                page,
                limit,
                total,
                "server page exceeds its window, truncating"
            );
            items.truncate(window);
        }

        Self {
            items,
            page,
            limit,
            total,
        }
    }

    /// Number of entries the page window can legally hold.
    fn window(page: u32, limit: u32, total: u64) -> usize {
        let offset = u64::from(page - 1) * u64::from(limit);
        let remaining = total.saturating_sub(offset);
        usize::try_from(remaining.min(u64::from(limit))).unwrap_or(usize::MAX)
    }

    /// Applies a server-confirmed patch to the entry with the given key.
    ///
    /// See [`merge_by_key`]; returns `false` (collection unchanged) when the
    /// entity is not on the loaded page.
    pub fn merge(&mut self, id: &str, apply: impl FnOnce(&mut T)) -> bool {
        merge_by_key(&mut self.items, id, apply)
    }
}

impl<T> Default for PagedCollection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            limit: 1,
            total: 0,
        }
    }
}

/// Applies a partial update to the entry whose key equals `id`, in place.
///
/// Order and unrelated entries are untouched. Returns `true` when an entry
/// was patched. A missing id is a silent no-op, not an error: the entity may
/// legitimately live outside the currently loaded page.
pub fn merge_by_key<T: Keyed>(items: &mut [T], id: &str, apply: impl FnOnce(&mut T)) -> bool {
    match items.iter_mut().find(|item| item.key() == id) {
        Some(item) => {
            apply(item);
            true
        }
        None => {
            tracing::debug!(id, "merge target not on loaded page, skipping");
            false
        }
    }
}
