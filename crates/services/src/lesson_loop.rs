//! Orchestrates lesson sessions against the catalog and progress storage.

use std::sync::Arc;

use lingo_core::catalog::Catalog;
use lingo_core::grader::Verdict;
use lingo_core::model::{CourseId, ProgressRecord, UserId};

use crate::error::SessionError;
use crate::lesson_session::LessonSession;
use crate::progress_service::ProgressService;

/// Starts sessions from the bundled catalog and routes graded outcomes to
/// the progress service.
#[derive(Clone)]
pub struct LessonLoopService {
    catalog: Arc<Catalog>,
    progress: ProgressService,
}

impl LessonLoopService {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, progress: ProgressService) -> Self {
        Self { catalog, progress }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Start a session over the course's bundled lessons, in fixture order.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoLessons`] for an unknown course or one with
    /// no bundled lessons yet.
    pub fn start(&self, course_id: CourseId) -> Result<LessonSession, SessionError> {
        let lessons = self.catalog.lessons_for(&course_id).to_vec();
        LessonSession::new(course_id, lessons)
    }

    /// Persist one graded answer for a course.
    ///
    /// The course total written on a first attempt is the declared course
    /// size when the catalog knows the course, the bundled lesson count
    /// otherwise. Storage failures are logged by the progress service and
    /// swallowed.
    pub async fn persist_outcome(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
        verdict: Verdict,
        reward: u32,
    ) -> Option<ProgressRecord> {
        let total_lessons = self.catalog.course(course_id).map_or_else(
            || self.catalog.lessons_for(course_id).len() as u32,
            |course| course.total_lessons(),
        );
        self.progress
            .record_outcome(user_id, course_id, verdict, reward, total_lessons)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingo_core::grader::Answer;
    use lingo_core::time::fixed_clock;
    use storage::repository::{InMemoryRepository, ProgressRepository};

    fn service_with_repo() -> (LessonLoopService, Arc<InMemoryRepository>) {
        let repo = Arc::new(InMemoryRepository::new());
        let progress = ProgressService::new(repo.clone(), fixed_clock());
        let service = LessonLoopService::new(Arc::new(Catalog::builtin()), progress);
        (service, repo)
    }

    #[test]
    fn unknown_course_cannot_start() {
        let (service, _repo) = service_with_repo();
        let err = service.start(CourseId::new("haskell")).unwrap_err();
        assert!(matches!(err, SessionError::NoLessons { .. }));
    }

    #[tokio::test]
    async fn graded_answer_lands_in_storage_with_course_total() {
        let (service, repo) = service_with_repo();
        let user = UserId::new("user-1");
        let mut session = service.start(CourseId::new("sql")).unwrap();

        let graded = session.submit(Answer::Choice(1)).unwrap();
        let (verdict, reward) = (graded.verdict, graded.reward);
        let record = service
            .persist_outcome(&user, session.course_id(), verdict, reward)
            .await
            .unwrap();

        assert_eq!(record.xp(), 10);
        assert_eq!(record.total_lessons(), 35);
        let stored = repo
            .find(&user, &CourseId::new("sql"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.xp(), 10);
    }
}
