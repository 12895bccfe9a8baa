//! One run through a course's lessons.
//!
//! A session owns the lesson list, a cursor, and the run's own counters
//! (hearts and XP earned this run). Grading is synchronous; persistence is
//! someone else's job.

use lingo_core::grader::{self, Answer, Verdict};
use lingo_core::model::{CourseId, Lesson, MAX_HEARTS};

use crate::error::SessionError;

/// What a submitted answer graded to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradedAnswer {
    pub answer: Answer,
    pub verdict: Verdict,
    /// XP the lesson pays out on a correct answer.
    pub reward: u32,
}

/// Grading state of the lesson under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerState {
    Unanswered,
    Graded(GradedAnswer),
}

/// Where the cursor sits, for the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// Zero-based index of the current lesson.
    pub index: usize,
    pub total: usize,
}

impl SessionProgress {
    /// Percentage of the course reached, counting the current lesson.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (((self.index + 1) * 100) / self.total) as u32
    }
}

/// Result of advancing past a graded lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    NextLesson,
    CourseComplete,
}

#[derive(Debug)]
pub struct LessonSession {
    course_id: CourseId,
    lessons: Vec<Lesson>,
    cursor: usize,
    state: AnswerState,
    hearts: u8,
    xp_earned: u32,
    complete: bool,
}

impl LessonSession {
    /// Start a session over `lessons` in order.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoLessons`] for an empty lesson list.
    pub fn new(course_id: CourseId, lessons: Vec<Lesson>) -> Result<Self, SessionError> {
        if lessons.is_empty() {
            return Err(SessionError::NoLessons { course: course_id });
        }
        Ok(Self {
            course_id,
            lessons,
            cursor: 0,
            state: AnswerState::Unanswered,
            hearts: MAX_HEARTS,
            xp_earned: 0,
            complete: false,
        })
    }

    #[must_use]
    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    /// The lesson under the cursor, or `None` once the course is complete.
    #[must_use]
    pub fn current_lesson(&self) -> Option<&Lesson> {
        if self.complete {
            None
        } else {
            self.lessons.get(self.cursor)
        }
    }

    #[must_use]
    pub fn answer_state(&self) -> &AnswerState {
        &self.state
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            index: self.cursor,
            total: self.lessons.len(),
        }
    }

    #[must_use]
    pub fn hearts(&self) -> u8 {
        self.hearts
    }

    /// XP earned in this run, not the stored course total.
    #[must_use]
    pub fn xp_earned(&self) -> u32 {
        self.xp_earned
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Grade `answer` against the current lesson and book the outcome on the
    /// session counters.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Completed`] after the course finished and
    /// [`SessionError::AlreadyGraded`] when the current lesson already has a
    /// verdict. Grade again only after [`retry`](Self::retry).
    pub fn submit(&mut self, answer: Answer) -> Result<&GradedAnswer, SessionError> {
        if self.complete {
            return Err(SessionError::Completed);
        }
        if matches!(self.state, AnswerState::Graded(_)) {
            return Err(SessionError::AlreadyGraded);
        }
        let lesson = &self.lessons[self.cursor];
        let verdict = grader::grade(lesson, &answer);
        let reward = lesson.xp_reward();
        match verdict {
            Verdict::Correct => self.xp_earned = self.xp_earned.saturating_add(reward),
            Verdict::Incorrect => self.hearts = self.hearts.saturating_sub(1),
        }
        self.state = AnswerState::Graded(GradedAnswer {
            answer,
            verdict,
            reward,
        });
        match &self.state {
            AnswerState::Graded(graded) => Ok(graded),
            AnswerState::Unanswered => unreachable!("state was just set to graded"),
        }
    }

    /// Clear the verdict so the same lesson can be answered again. Hearts and
    /// XP already booked stay as they are.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotGraded`] when there is nothing to retry.
    pub fn retry(&mut self) -> Result<(), SessionError> {
        if self.complete {
            return Err(SessionError::Completed);
        }
        if matches!(self.state, AnswerState::Unanswered) {
            return Err(SessionError::NotGraded);
        }
        self.state = AnswerState::Unanswered;
        Ok(())
    }

    /// Move past a graded lesson.
    ///
    /// Signals [`Advance::CourseComplete`] exactly once, when the last lesson
    /// is left behind; the cursor never moves past the end.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotGraded`] when the current lesson has no
    /// verdict yet, [`SessionError::Completed`] after completion was already
    /// signalled.
    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        if self.complete {
            return Err(SessionError::Completed);
        }
        if matches!(self.state, AnswerState::Unanswered) {
            return Err(SessionError::NotGraded);
        }
        self.state = AnswerState::Unanswered;
        if self.cursor + 1 < self.lessons.len() {
            self.cursor += 1;
            Ok(Advance::NextLesson)
        } else {
            self.complete = true;
            Ok(Advance::CourseComplete)
        }
    }
}
