use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::{CourseId, ProgressId, UserId};

/// Upper bound on the hearts counter.
pub const MAX_HEARTS: u8 = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("hearts {hearts} outside [0, {MAX_HEARTS}]")]
    HeartsOutOfRange { hearts: u8 },

    #[error("lessons completed ({completed}) exceeds total lessons ({total})")]
    CompletedExceedsTotal { completed: u32, total: u32 },

    #[error("level must be at least 1")]
    ZeroLevel,

    #[error("total lessons must be at least 1")]
    ZeroTotalLessons,
}

/// Per-user, per-course counters: XP, streak, hearts, level, completion.
///
/// There is exactly one record per (user, course) pair. It is created lazily
/// on the first graded answer and mutated in place afterwards; XP never
/// decreases and hearts stay within `[0, MAX_HEARTS]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    id: ProgressId,
    user_id: UserId,
    course_id: CourseId,
    xp: u32,
    streak: u32,
    hearts: u8,
    level: u32,
    lessons_completed: u32,
    total_lessons: u32,
    last_active: DateTime<Utc>,
}

impl ProgressRecord {
    /// Creates the record for a (user, course) pair's very first graded
    /// answer: full hearts minus one if that answer was wrong, the lesson
    /// reward if it was right.
    #[must_use]
    pub fn first_attempt(
        id: ProgressId,
        user_id: UserId,
        course_id: CourseId,
        correct: bool,
        reward: u32,
        total_lessons: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            course_id,
            xp: if correct { reward } else { 0 },
            streak: 1,
            hearts: if correct { MAX_HEARTS } else { MAX_HEARTS - 1 },
            level: 1,
            lessons_completed: u32::from(correct),
            total_lessons: total_lessons.max(1),
            last_active: now,
        }
    }

    /// Rehydrates a record from storage, re-checking the invariants.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` when hearts, level, or the completion counter
    /// violate the documented bounds.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persisted(
        id: ProgressId,
        user_id: UserId,
        course_id: CourseId,
        xp: u32,
        streak: u32,
        hearts: u8,
        level: u32,
        lessons_completed: u32,
        total_lessons: u32,
        last_active: DateTime<Utc>,
    ) -> Result<Self, ProgressError> {
        if hearts > MAX_HEARTS {
            return Err(ProgressError::HeartsOutOfRange { hearts });
        }
        if level == 0 {
            return Err(ProgressError::ZeroLevel);
        }
        if total_lessons == 0 {
            return Err(ProgressError::ZeroTotalLessons);
        }
        if lessons_completed > total_lessons {
            return Err(ProgressError::CompletedExceedsTotal {
                completed: lessons_completed,
                total: total_lessons,
            });
        }

        Ok(Self {
            id,
            user_id,
            course_id,
            xp,
            streak,
            hearts,
            level,
            lessons_completed,
            total_lessons,
            last_active,
        })
    }

    /// Applies a correct answer: XP grows by the reward, one more lesson is
    /// counted as completed (clamped at the course total).
    pub fn record_correct(&mut self, reward: u32, now: DateTime<Utc>) {
        self.xp = self.xp.saturating_add(reward);
        if self.lessons_completed < self.total_lessons {
            self.lessons_completed += 1;
        }
        self.last_active = now;
    }

    /// Applies an incorrect answer: one heart lost, floored at zero.
    pub fn record_incorrect(&mut self, now: DateTime<Utc>) {
        self.hearts = self.hearts.saturating_sub(1);
        self.last_active = now;
    }

    #[must_use]
    pub fn id(&self) -> &ProgressId {
        &self.id
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    #[must_use]
    pub fn xp(&self) -> u32 {
        self.xp
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn hearts(&self) -> u8 {
        self.hearts
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn lessons_completed(&self) -> u32 {
        self.lessons_completed
    }

    #[must_use]
    pub fn total_lessons(&self) -> u32 {
        self.total_lessons
    }

    #[must_use]
    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }

    /// Completion as a percentage in `[0, 100]`.
    #[must_use]
    pub fn completion_percent(&self) -> f64 {
        f64::from(self.lessons_completed) / f64::from(self.total_lessons) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn record(hearts: u8, completed: u32) -> ProgressRecord {
        ProgressRecord::from_persisted(
            ProgressId::new("p-1"),
            UserId::new("u-1"),
            CourseId::new("sql"),
            25,
            1,
            hearts,
            1,
            completed,
            35,
            fixed_now(),
        )
        .unwrap()
    }

    #[test]
    fn first_correct_attempt_keeps_full_hearts() {
        let rec = ProgressRecord::first_attempt(
            ProgressId::new("p-1"),
            UserId::new("u-1"),
            CourseId::new("sql"),
            true,
            10,
            35,
            fixed_now(),
        );
        assert_eq!(rec.hearts(), 5);
        assert_eq!(rec.xp(), 10);
        assert_eq!(rec.lessons_completed(), 1);
        assert_eq!(rec.streak(), 1);
        assert_eq!(rec.level(), 1);
    }

    #[test]
    fn first_incorrect_attempt_costs_one_heart() {
        let rec = ProgressRecord::first_attempt(
            ProgressId::new("p-1"),
            UserId::new("u-1"),
            CourseId::new("sql"),
            false,
            10,
            35,
            fixed_now(),
        );
        assert_eq!(rec.hearts(), 4);
        assert_eq!(rec.xp(), 0);
        assert_eq!(rec.lessons_completed(), 0);
    }

    #[test]
    fn correct_answer_adds_reward_and_completion() {
        let mut rec = record(5, 2);
        rec.record_correct(10, fixed_now());
        assert_eq!(rec.xp(), 35);
        assert_eq!(rec.lessons_completed(), 3);
        assert_eq!(rec.hearts(), 5);
    }

    #[test]
    fn completion_is_clamped_at_total() {
        let mut rec = ProgressRecord::from_persisted(
            ProgressId::new("p-1"),
            UserId::new("u-1"),
            CourseId::new("sql"),
            25,
            1,
            5,
            1,
            35,
            35,
            fixed_now(),
        )
        .unwrap();
        rec.record_correct(10, fixed_now());
        assert_eq!(rec.lessons_completed(), 35);
        assert_eq!(rec.xp(), 35);
    }

    #[test]
    fn hearts_floor_at_zero() {
        let mut rec = record(1, 2);
        rec.record_incorrect(fixed_now());
        assert_eq!(rec.hearts(), 0);
        rec.record_incorrect(fixed_now());
        assert_eq!(rec.hearts(), 0);
    }

    #[test]
    fn rehydration_rejects_out_of_range_hearts() {
        let err = ProgressRecord::from_persisted(
            ProgressId::new("p-1"),
            UserId::new("u-1"),
            CourseId::new("sql"),
            0,
            1,
            6,
            1,
            0,
            35,
            fixed_now(),
        )
        .unwrap_err();
        assert_eq!(err, ProgressError::HeartsOutOfRange { hearts: 6 });
    }

    #[test]
    fn rehydration_rejects_overflowing_completion() {
        let err = ProgressRecord::from_persisted(
            ProgressId::new("p-1"),
            UserId::new("u-1"),
            CourseId::new("sql"),
            0,
            1,
            5,
            1,
            36,
            35,
            fixed_now(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ProgressError::CompletedExceedsTotal {
                completed: 36,
                total: 35
            }
        );
    }

    #[test]
    fn completion_percent_spans_full_range() {
        assert!((record(5, 0).completion_percent()).abs() < f64::EPSILON);
        let done = record(5, 35);
        assert!((done.completion_percent() - 100.0).abs() < f64::EPSILON);
    }
}
