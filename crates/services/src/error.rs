//! Shared error types for the services crate.

use thiserror::Error;

use lingo_core::model::CourseId;

/// Errors emitted by lesson session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no lessons available for course {course}")]
    NoLessons { course: CourseId },
    #[error("course already completed")]
    Completed,
    #[error("current lesson is already graded")]
    AlreadyGraded,
    #[error("current lesson has not been graded yet")]
    NotGraded,
}
