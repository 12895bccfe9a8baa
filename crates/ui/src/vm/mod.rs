mod course_vm;
mod lesson_vm;

pub use course_vm::{CourseCardVm, StatsVm, map_course_card, map_stats};
pub use lesson_vm::{LessonVm, ResultVm, map_lesson, map_result};
