//! Core domain types: entities, keyed collections, and the normalized error
//! shape. This layer has no knowledge of the transport or of timers.

pub mod collection;
pub mod entities;
pub mod error;

pub use collection::{merge_by_key, Keyed, PagedCollection};
pub use entities::{Category, CategoryDraft, Course, EnrollmentRequest, User};
pub use error::{ApiError, ErrorKind, Result};
