//! Courses store: the listing backing the enrollment form.

use crate::domain::Course;
use crate::request::{normalize, RequestChannel};

use super::Engine;

const FETCH_COURSES: &str = "Failed to fetch courses";

/// Courses state block.
#[derive(Debug, Default)]
pub struct CoursesState {
    /// Unpaged course listing.
    pub list: RequestChannel<Vec<Course>>,
}

impl Engine {
    /// Fetches the courses open to manual enrollment.
    pub async fn fetch_courses(&self) {
        let seq = self.courses.borrow_mut().list.begin();
        tracing::debug!(seq = seq.value(), "fetching courses");

        match self.api.list_courses().await {
            Ok(body) => {
                self.courses.borrow_mut().list.resolve(seq, body.courses);
            }
            Err(raw) => {
                let error = normalize(&raw, FETCH_COURSES);
                self.note_failure(&error);
                self.courses.borrow_mut().list.reject(seq, error);
            }
        }
    }
}
