//! Persisted-token port.
//!
//! The engine never touches browser storage or keychains directly; it talks
//! to this small contract. [`MemoryTokenStore`] is the shipped in-process
//! implementation, suitable for tests and embedders that persist elsewhere.

use std::cell::RefCell;

/// Contract for the persisted bearer token.
pub trait TokenStore {
    /// Returns the stored token, if any.
    fn get(&self) -> Option<String>;

    /// Stores a token, replacing any previous one.
    fn set(&self, token: &str);

    /// Removes the stored token.
    fn clear(&self);
}

/// In-process token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn set(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.borrow_mut() = None;
    }
}
