use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{CourseId, LessonId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson title cannot be empty")]
    EmptyTitle,

    #[error("lesson prompt cannot be empty")]
    EmptyPrompt,

    #[error("multiple-choice lesson needs at least two choices")]
    TooFewChoices,

    #[error("expected choice index {index} out of range for {choices} choices")]
    ChoiceOutOfRange { index: usize, choices: usize },

    #[error("expected answer kind does not match lesson kind")]
    AnswerKindMismatch,

    #[error("expected answer text cannot be empty")]
    EmptyExpectedText,
}

/// The question form rendered for a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LessonKind {
    MultipleChoice,
    FillInBlank,
    FreeFormCode,
}

impl LessonKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple-choice",
            Self::FillInBlank => "fill-in-blank",
            Self::FreeFormCode => "free-form-code",
        }
    }
}

/// Per-lesson difficulty, independent of the course-level badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LessonDifficulty {
    Easy,
    Medium,
    Hard,
}

impl LessonDifficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

/// The stored correct answer: a choice index for multiple choice, verbatim
/// text otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpectedAnswer {
    Choice(usize),
    Text(String),
}

/// One quiz unit: prompt, optional code snippet, expected answer, reward.
///
/// Lessons are immutable fixture data; nothing in the user-facing flow
/// persists them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    id: LessonId,
    course_id: CourseId,
    title: String,
    kind: LessonKind,
    prompt: String,
    code: Option<String>,
    choices: Vec<String>,
    expected: ExpectedAnswer,
    explanation: String,
    xp_reward: u32,
    difficulty: LessonDifficulty,
}

impl Lesson {
    /// Creates a lesson, checking that the expected answer fits the kind.
    ///
    /// # Errors
    ///
    /// Returns `LessonError` when the title or prompt is blank, a
    /// multiple-choice lesson has fewer than two choices or an out-of-range
    /// expected index, or a text lesson carries a choice-index answer.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: LessonId,
        course_id: CourseId,
        title: impl Into<String>,
        kind: LessonKind,
        prompt: impl Into<String>,
        code: Option<String>,
        choices: Vec<String>,
        expected: ExpectedAnswer,
        explanation: impl Into<String>,
        xp_reward: u32,
        difficulty: LessonDifficulty,
    ) -> Result<Self, LessonError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(LessonError::EmptyTitle);
        }
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(LessonError::EmptyPrompt);
        }

        match (kind, &expected) {
            (LessonKind::MultipleChoice, ExpectedAnswer::Choice(index)) => {
                if choices.len() < 2 {
                    return Err(LessonError::TooFewChoices);
                }
                if *index >= choices.len() {
                    return Err(LessonError::ChoiceOutOfRange {
                        index: *index,
                        choices: choices.len(),
                    });
                }
            }
            (LessonKind::FillInBlank | LessonKind::FreeFormCode, ExpectedAnswer::Text(text)) => {
                if text.is_empty() {
                    return Err(LessonError::EmptyExpectedText);
                }
            }
            _ => return Err(LessonError::AnswerKindMismatch),
        }

        Ok(Self {
            id,
            course_id,
            title,
            kind,
            prompt,
            code,
            choices,
            expected,
            explanation: explanation.into(),
            xp_reward,
            difficulty,
        })
    }

    #[must_use]
    pub fn id(&self) -> &LessonId {
        &self.id
    }

    #[must_use]
    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn kind(&self) -> LessonKind {
        self.kind
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Ordered answer choices; empty unless this is a multiple-choice lesson.
    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    #[must_use]
    pub fn expected(&self) -> &ExpectedAnswer {
        &self.expected
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn xp_reward(&self) -> u32 {
        self.xp_reward
    }

    #[must_use]
    pub fn difficulty(&self) -> LessonDifficulty {
        self.difficulty
    }
}
