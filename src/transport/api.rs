//! The REST transport port.
//!
//! [`AdminApi`] abstracts over the concrete HTTP client the way the engine
//! sees it: one async method per endpoint, each resolving to a typed body or
//! a [`TransportError`]. HTTPS, base paths and bearer-header injection are
//! the implementation's concern and live outside this crate; tests script the
//! trait directly.
//!
//! The trait is `?Send`: the engine runs on a single-threaded cooperative
//! runtime and its futures never cross threads.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Category, CategoryDraft, EnrollmentRequest};

use super::dto::{
    BlockUserBody, CategoryBody, CategoryListBody, CourseListBody, EnrollBody, LoginBody,
    SuggestionBody, UserPageBody,
};

/// A failure below the domain layer.
///
/// `Status` carries the raw body so the normalization layer can extract the
/// server's `{message}` envelope; nothing above normalization ever sees this
/// type.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// No response received (DNS, connect, timeout...).
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response.
    #[error("request failed with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body, possibly a `{message}` envelope.
        body: String,
    },

    /// 2xx response whose body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Convenience alias for transport results.
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Abstraction over the admin REST API.
///
/// Minimal and use-case-shaped: each method maps to exactly one endpoint the
/// engine dispatches.
#[async_trait(?Send)]
pub trait AdminApi {
    /// `POST /admin/`: admin login.
    async fn login(&self, email: &str, password: &str) -> TransportResult<LoginBody>;

    /// `GET /admin/users?page&limit`: paged user listing.
    async fn list_users(&self, page: u32, limit: u32) -> TransportResult<UserPageBody>;

    /// `PATCH /admin/users/{id}`: toggle a user's blocked state.
    async fn toggle_user_block(&self, id: &str) -> TransportResult<BlockUserBody>;

    /// `GET /admin/categories`: full category listing.
    async fn list_categories(&self) -> TransportResult<CategoryListBody>;

    /// `POST /admin/categories`: create a category.
    async fn create_category(&self, draft: &CategoryDraft) -> TransportResult<CategoryBody>;

    /// `GET /admin/categories/{id}`: fetch one category.
    async fn get_category(&self, id: &str) -> TransportResult<Category>;

    /// `PATCH /admin/categories/{id}`: update a category.
    async fn update_category(
        &self,
        id: &str,
        draft: &CategoryDraft,
    ) -> TransportResult<CategoryBody>;

    /// `DELETE /admin/categories/{id}`: soft-delete or restore a category.
    async fn set_category_deleted(&self, id: &str, deleted: bool)
        -> TransportResult<CategoryBody>;

    /// `GET /admin/enrollment/users?query`: query-scoped user suggestions.
    async fn user_suggestions(&self, query: &str) -> TransportResult<SuggestionBody>;

    /// `GET /admin/enrollment/courses`: courses open to manual enrollment.
    async fn list_courses(&self) -> TransportResult<CourseListBody>;

    /// `POST /admin/enrollment`: enroll a user into a course.
    async fn enroll(&self, request: &EnrollmentRequest) -> TransportResult<EnrollBody>;
}
