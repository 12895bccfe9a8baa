mod course;
mod ids;
mod lesson;
mod progress;
mod user;

pub use course::{Course, CourseDifficulty, CourseError};
pub use ids::{CourseId, LessonId, ProgressId, UserId};
pub use lesson::{ExpectedAnswer, Lesson, LessonDifficulty, LessonError, LessonKind};
pub use progress::{MAX_HEARTS, ProgressError, ProgressRecord};
pub use user::{User, UserError};
