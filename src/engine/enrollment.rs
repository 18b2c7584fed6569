//! Manual enrollment submission.

use std::rc::Rc;

use crate::domain::{EnrollmentRequest, User};
use crate::request::{normalize, RequestChannel};
use crate::timing::EphemeralFlag;

use super::Engine;

const ENROLL_USER: &str = "Failed to enroll user";

/// Enrollment state block.
#[derive(Debug, Default)]
pub struct EnrollmentState {
    /// Enrollment lifecycle; data is the enrolled user as confirmed.
    pub enroll: RequestChannel<User>,

    /// Ephemeral "user enrolled" feedback.
    pub enrolled: EphemeralFlag,
}

impl Engine {
    /// Enrolls a user into a course.
    ///
    /// The user id typically comes from the suggestion search's current
    /// selection (see [`Engine::selected_user`]). Success raises the
    /// ephemeral feedback for the configured TTL.
    pub async fn enroll(self: Rc<Self>, user_id: &str, course_id: &str, enrollment_type: &str) {
        let request = EnrollmentRequest {
            user_id: user_id.to_string(),
            course_id: course_id.to_string(),
            enrollment_type: enrollment_type.to_string(),
        };

        let seq = {
            let mut enrollment = self.enrollment.borrow_mut();
            enrollment.enrolled.clear();
            enrollment.enroll.begin()
        };
        tracing::debug!(user_id, course_id, seq = seq.value(), "enrolling user");

        match self.api.enroll(&request).await {
            Ok(body) => {
                let ticket = {
                    let mut enrollment = self.enrollment.borrow_mut();
                    if !enrollment.enroll.resolve(seq, body.user) {
                        return;
                    }
                    enrollment.enrolled.raise()
                };
                tracing::debug!(user_id, course_id, "enrollment confirmed");

                let engine = Rc::clone(&self);
                tokio::task::spawn_local(async move {
                    tokio::time::sleep(engine.config.feedback_ttl).await;
                    engine.enrollment.borrow_mut().enrolled.expire(ticket);
                });
            }
            Err(raw) => {
                let error = normalize(&raw, ENROLL_USER);
                self.note_failure(&error);
                self.enrollment.borrow_mut().enroll.reject(seq, error);
            }
        }
    }

    /// Invalidates the pending "enrolled" feedback countdown on view
    /// teardown.
    pub fn cancel_enrollment_feedback(&self) {
        self.enrollment.borrow_mut().enrolled.cancel();
    }
}
