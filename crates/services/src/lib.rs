#![forbid(unsafe_code)]

//! Application services for the CodeLingo desktop app.
//!
//! Services own the behavior the views trigger: resolving the signed-in
//! user, walking a course lesson by lesson, grading answers, and keeping
//! per-course progress records up to date in storage.

pub mod auth_service;
pub mod dashboard_service;
pub mod error;
pub mod lesson_loop;
pub mod lesson_session;
pub mod progress_service;

pub use auth_service::{AuthService, AuthState, AuthSubscription};
pub use dashboard_service::{CourseProgressSummary, DashboardOverview, DashboardService};
pub use error::SessionError;
pub use lesson_loop::LessonLoopService;
pub use lesson_session::{Advance, AnswerState, GradedAnswer, LessonSession, SessionProgress};
pub use progress_service::ProgressService;
