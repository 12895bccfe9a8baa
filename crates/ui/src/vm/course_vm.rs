use lingo_core::model::CourseDifficulty;
use services::{CourseProgressSummary, DashboardOverview};

/// UI-ready representation of one dashboard course card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseCardVm {
    pub id: String,
    pub name: String,
    pub description: String,
    pub difficulty_label: &'static str,
    pub started: bool,
    /// Completion percentage, rounded down.
    pub percent: u32,
    pub progress_label: String,
    pub level_label: String,
    pub xp_label: String,
    pub cta_label: &'static str,
}

/// The stats strip above the course grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsVm {
    pub total_xp: String,
    pub best_streak: String,
    pub hearts: String,
    pub lessons_completed: String,
}

#[must_use]
pub fn map_course_card(entry: &CourseProgressSummary) -> CourseCardVm {
    let course = &entry.course;
    match &entry.progress {
        Some(record) => CourseCardVm {
            id: course.id().as_str().to_owned(),
            name: course.name().to_owned(),
            description: course.description().to_owned(),
            difficulty_label: difficulty_label(course.difficulty()),
            started: true,
            percent: record.completion_percent().floor() as u32,
            progress_label: format!(
                "{}/{} lessons",
                record.lessons_completed(),
                record.total_lessons()
            ),
            level_label: format!("Level {}", record.level()),
            xp_label: format!("{} XP", record.xp()),
            cta_label: "Continue Learning",
        },
        None => CourseCardVm {
            id: course.id().as_str().to_owned(),
            name: course.name().to_owned(),
            description: course.description().to_owned(),
            difficulty_label: difficulty_label(course.difficulty()),
            started: false,
            percent: 0,
            progress_label: format!("0/{} lessons", course.total_lessons()),
            level_label: "Level 1".to_owned(),
            xp_label: "0 XP".to_owned(),
            cta_label: "Start Course",
        },
    }
}

#[must_use]
pub fn map_stats(overview: &DashboardOverview) -> StatsVm {
    StatsVm {
        total_xp: overview.total_xp.to_string(),
        best_streak: overview.best_streak.to_string(),
        hearts: overview.hearts.to_string(),
        lessons_completed: overview.lessons_completed.to_string(),
    }
}

fn difficulty_label(difficulty: CourseDifficulty) -> &'static str {
    match difficulty {
        CourseDifficulty::Beginner => "Beginner",
        CourseDifficulty::Intermediate => "Intermediate",
        CourseDifficulty::Advanced => "Advanced",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingo_core::model::{Course, CourseId, ProgressId, ProgressRecord, UserId};
    use lingo_core::time::fixed_now;

    fn course() -> Course {
        Course::new(
            CourseId::new("sql"),
            "SQL",
            "Master database queries",
            35,
            CourseDifficulty::Beginner,
        )
        .unwrap()
    }

    #[test]
    fn fresh_course_card_invites_a_start() {
        let vm = map_course_card(&CourseProgressSummary {
            course: course(),
            progress: None,
        });
        assert!(!vm.started);
        assert_eq!(vm.percent, 0);
        assert_eq!(vm.progress_label, "0/35 lessons");
        assert_eq!(vm.cta_label, "Start Course");
        assert_eq!(vm.difficulty_label, "Beginner");
    }

    #[test]
    fn started_course_card_shows_progress() {
        let record = ProgressRecord::from_persisted(
            ProgressId::random(),
            UserId::new("user-1"),
            CourseId::new("sql"),
            25,
            1,
            4,
            1,
            2,
            35,
            fixed_now(),
        )
        .unwrap();
        let vm = map_course_card(&CourseProgressSummary {
            course: course(),
            progress: Some(record),
        });
        assert!(vm.started);
        assert_eq!(vm.percent, 5);
        assert_eq!(vm.progress_label, "2/35 lessons");
        assert_eq!(vm.xp_label, "25 XP");
        assert_eq!(vm.cta_label, "Continue Learning");
    }
}
