use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::CourseId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("course name cannot be empty")]
    EmptyName,

    #[error("course must declare at least one lesson")]
    ZeroLessons,
}

/// Curriculum difficulty shown as a badge on course cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseDifficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseDifficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

/// A named curriculum containing an ordered set of lessons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseId,
    name: String,
    description: String,
    total_lessons: u32,
    difficulty: CourseDifficulty,
}

impl Course {
    /// Creates a course.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::EmptyName` for a blank name and
    /// `CourseError::ZeroLessons` when the declared lesson count is zero.
    pub fn new(
        id: CourseId,
        name: impl Into<String>,
        description: impl Into<String>,
        total_lessons: u32,
        difficulty: CourseDifficulty,
    ) -> Result<Self, CourseError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CourseError::EmptyName);
        }
        if total_lessons == 0 {
            return Err(CourseError::ZeroLessons);
        }

        Ok(Self {
            id,
            name,
            description: description.into(),
            total_lessons,
            difficulty,
        })
    }

    #[must_use]
    pub fn id(&self) -> &CourseId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Declared size of the full curriculum, which may exceed the number of
    /// bundled lessons.
    #[must_use]
    pub fn total_lessons(&self) -> u32 {
        self.total_lessons
    }

    #[must_use]
    pub fn difficulty(&self) -> CourseDifficulty {
        self.difficulty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_name() {
        let err = Course::new(
            CourseId::new("sql"),
            "  ",
            "desc",
            35,
            CourseDifficulty::Beginner,
        )
        .unwrap_err();
        assert_eq!(err, CourseError::EmptyName);
    }

    #[test]
    fn rejects_zero_lessons() {
        let err = Course::new(
            CourseId::new("sql"),
            "SQL",
            "desc",
            0,
            CourseDifficulty::Beginner,
        )
        .unwrap_err();
        assert_eq!(err, CourseError::ZeroLessons);
    }

    #[test]
    fn difficulty_labels() {
        assert_eq!(CourseDifficulty::Beginner.as_str(), "Beginner");
        assert_eq!(CourseDifficulty::Advanced.as_str(), "Advanced");
    }
}
