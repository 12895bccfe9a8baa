//! Answer grading: strict equality against the stored expected answer.
//!
//! There is deliberately no normalization and no partial credit. Free-form
//! code answers are compared character for character, so they only grade
//! correct when the learner retypes the sample solution verbatim.

use serde::{Deserialize, Serialize};

use crate::model::{ExpectedAnswer, Lesson};

/// A learner-submitted answer: a selected choice index or typed text,
/// depending on the lesson kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    Choice(usize),
    Text(String),
}

/// Outcome of grading one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

/// Grades `answer` against the lesson's stored expected answer.
///
/// A mismatched answer shape (text for a multiple-choice lesson, or a choice
/// index for a text lesson) is simply incorrect.
#[must_use]
pub fn grade(lesson: &Lesson, answer: &Answer) -> Verdict {
    let correct = match (lesson.expected(), answer) {
        (ExpectedAnswer::Choice(expected), Answer::Choice(selected)) => expected == selected,
        (ExpectedAnswer::Text(expected), Answer::Text(submitted)) => expected == submitted,
        _ => false,
    };

    if correct {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CourseId, LessonDifficulty, LessonId, LessonKind};

    fn choice_lesson(expected: usize) -> Lesson {
        Lesson::new(
            LessonId::new("sql-1"),
            CourseId::new("sql"),
            "Basic SELECT Query",
            LessonKind::MultipleChoice,
            "Which SQL statement is used to retrieve data?",
            None,
            vec!["GET".into(), "SELECT".into(), "RETRIEVE".into(), "FETCH".into()],
            ExpectedAnswer::Choice(expected),
            "SELECT queries data.",
            10,
            LessonDifficulty::Easy,
        )
        .unwrap()
    }

    fn code_lesson(expected: &str) -> Lesson {
        Lesson::new(
            LessonId::new("python-2"),
            CourseId::new("python"),
            "Python Functions",
            LessonKind::FreeFormCode,
            "Write a function that adds two numbers",
            None,
            Vec::new(),
            ExpectedAnswer::Text(expected.into()),
            "def defines a function.",
            20,
            LessonDifficulty::Easy,
        )
        .unwrap()
    }

    #[test]
    fn matching_choice_index_is_correct() {
        let lesson = choice_lesson(1);
        assert_eq!(grade(&lesson, &Answer::Choice(1)), Verdict::Correct);
    }

    #[test]
    fn any_other_index_is_incorrect() {
        let lesson = choice_lesson(1);
        for index in [0, 2, 3, 7] {
            assert_eq!(grade(&lesson, &Answer::Choice(index)), Verdict::Incorrect);
        }
    }

    #[test]
    fn exact_text_is_correct() {
        let lesson = code_lesson("def add(a, b):\n    return a + b");
        assert_eq!(
            grade(&lesson, &Answer::Text("def add(a, b):\n    return a + b".into())),
            Verdict::Correct
        );
    }

    #[test]
    fn whitespace_difference_is_incorrect() {
        let lesson = code_lesson("def add(a, b):\n    return a + b");
        assert_eq!(
            grade(&lesson, &Answer::Text("def add(a, b):\n    return a + b ".into())),
            Verdict::Incorrect
        );
    }

    #[test]
    fn case_difference_is_incorrect() {
        let lesson = code_lesson("WHERE");
        assert_eq!(grade(&lesson, &Answer::Text("where".into())), Verdict::Incorrect);
    }

    #[test]
    fn mismatched_answer_shape_is_incorrect() {
        let lesson = choice_lesson(1);
        assert_eq!(
            grade(&lesson, &Answer::Text("SELECT".into())),
            Verdict::Incorrect
        );
        let code = code_lesson("WHERE");
        assert_eq!(grade(&code, &Answer::Choice(0)), Verdict::Incorrect);
    }
}
