//! Domain entities managed by the admin console.
//!
//! Every entity carries an immutable unique key (`_id` on the wire). Merge
//! and update operations locate entries by key, never by positional index.
//! Field names are renamed to match the REST payloads so these types
//! deserialize straight out of response bodies.

use serde::{Deserialize, Serialize};

use super::collection::Keyed;

/// A platform user as listed in the admin console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Immutable unique key.
    #[serde(rename = "_id")]
    pub id: String,

    /// Display name.
    pub name: String,

    /// Account email.
    pub email: String,

    /// Whether the account is blocked from signing in.
    #[serde(rename = "isBlocked", default)]
    pub is_blocked: bool,
}

impl Keyed for User {
    fn key(&self) -> &str {
        &self.id
    }
}

/// A course category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Immutable unique key.
    #[serde(rename = "_id")]
    pub id: String,

    /// Category name shown in listings and course forms.
    pub name: String,

    /// Free-form description.
    #[serde(default)]
    pub description: String,

    /// Soft-delete marker; deleted categories are restorable.
    #[serde(rename = "isDeleted", default)]
    pub is_deleted: bool,
}

impl Keyed for Category {
    fn key(&self) -> &str {
        &self.id
    }
}

/// A course available for manual enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Immutable unique key.
    #[serde(rename = "_id")]
    pub id: String,

    /// Course title.
    pub title: String,
}

impl Keyed for Course {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Payload for creating or updating a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDraft {
    /// Category name.
    pub name: String,

    /// Free-form description.
    pub description: String,
}

/// Payload for a manual enrollment.
///
/// `enrollment_type` is carried as a free-form string; the server owns the
/// vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentRequest {
    /// Key of the user to enroll.
    #[serde(rename = "userId")]
    pub user_id: String,

    /// Key of the target course.
    #[serde(rename = "courseId")]
    pub course_id: String,

    /// Enrollment kind, e.g. `"manual"`.
    #[serde(rename = "enrollmentType")]
    pub enrollment_type: String,
}
