//! Persists graded answers as per-course progress records.
//!
//! Persistence here is best effort: grading already happened in memory, so a
//! storage failure must never surface to the lesson flow. Failures are logged
//! and the in-memory record is returned regardless.

use std::sync::Arc;

use lingo_core::model::{CourseId, ProgressId, ProgressRecord, UserId};
use lingo_core::{Clock, grader::Verdict};
use storage::repository::{ProgressPatch, ProgressRepository, StorageError};

#[derive(Clone)]
pub struct ProgressService {
    repo: Arc<dyn ProgressRepository>,
    clock: Clock,
}

impl ProgressService {
    #[must_use]
    pub fn new(repo: Arc<dyn ProgressRepository>, clock: Clock) -> Self {
        Self { repo, clock }
    }

    /// Apply one graded answer to the user's record for `course_id`.
    ///
    /// Reads the existing record, applies the outcome, and writes it back:
    /// an update for an existing record, a fresh create otherwise. Returns
    /// the record as the session now sees it; `None` only when the read
    /// itself failed and no write was attempted.
    pub async fn record_outcome(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
        verdict: Verdict,
        reward: u32,
        total_lessons: u32,
    ) -> Option<ProgressRecord> {
        let now = self.clock.now();
        match self.repo.find(user_id, course_id).await {
            Ok(Some(mut record)) => {
                if verdict.is_correct() {
                    record.record_correct(reward, now);
                } else {
                    record.record_incorrect(now);
                }
                // Streak, level, and the course total are left as stored.
                let patch = ProgressPatch {
                    xp: Some(record.xp()),
                    hearts: Some(record.hearts()),
                    lessons_completed: Some(record.lessons_completed()),
                    last_active: Some(record.last_active()),
                    ..ProgressPatch::default()
                };
                if let Err(err) = self.repo.update(record.id(), &patch).await {
                    warn_write_failed(user_id, course_id, &err);
                }
                Some(record)
            }
            Ok(None) => {
                let record = ProgressRecord::first_attempt(
                    ProgressId::random(),
                    user_id.clone(),
                    course_id.clone(),
                    verdict.is_correct(),
                    reward,
                    total_lessons,
                    now,
                );
                if let Err(err) = self.repo.create(&record).await {
                    warn_write_failed(user_id, course_id, &err);
                }
                Some(record)
            }
            Err(err) => {
                tracing::warn!(
                    user = %user_id,
                    course = %course_id,
                    error = %err,
                    "progress lookup failed, skipping save"
                );
                None
            }
        }
    }
}

fn warn_write_failed(user_id: &UserId, course_id: &CourseId, err: &StorageError) {
    tracing::warn!(
        user = %user_id,
        course = %course_id,
        error = %err,
        "progress save failed, keeping in-memory state"
    );
}
