//! Wire envelopes for the admin REST API.
//!
//! One struct per response body, separate from the domain entities they
//! carry. Field names follow the JSON payloads; serde renames bridge to Rust
//! naming.

use serde::{Deserialize, Serialize};

use crate::domain::{Category, Course, User};

/// `POST /admin/` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginBody {
    /// Server acknowledgement message.
    #[serde(default)]
    pub message: String,

    /// Key of the signed-in admin.
    #[serde(rename = "adminId")]
    pub admin_id: String,

    /// Bearer token to inject on subsequent requests.
    pub token: String,
}

/// `GET /admin/users?page&limit` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPageBody {
    /// Users of the requested page.
    pub users: Vec<User>,

    /// Total users across all pages.
    pub total: u64,

    /// Echoed page number.
    pub page: u32,

    /// Echoed page size.
    pub limit: u32,
}

/// `PATCH /admin/users/{id}` response: the server-confirmed block state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockUserBody {
    /// Server acknowledgement message.
    #[serde(default)]
    pub message: String,

    /// Key of the toggled user.
    pub id: String,

    /// Confirmed block state after the toggle.
    #[serde(rename = "isBlocked")]
    pub is_blocked: bool,
}

/// `GET /admin/categories` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryListBody {
    /// All categories, including soft-deleted ones.
    pub categories: Vec<Category>,
}

/// Response carrying a single confirmed category (create, update,
/// delete/restore).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBody {
    /// Server acknowledgement message.
    #[serde(default)]
    pub message: String,

    /// The category after the operation.
    pub category: Category,
}

/// `GET /admin/enrollment/users?query` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionBody {
    /// Users matching the query, ordered by relevance.
    pub suggestions: Vec<User>,
}

/// `GET /admin/enrollment/courses` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseListBody {
    /// Courses available for manual enrollment.
    pub courses: Vec<Course>,
}

/// `POST /admin/enrollment` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollBody {
    /// Server acknowledgement message.
    #[serde(default)]
    pub message: String,

    /// The enrolled user as confirmed by the server.
    pub user: User,
}
