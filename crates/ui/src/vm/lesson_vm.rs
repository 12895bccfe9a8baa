use lingo_core::grader::Verdict;
use lingo_core::model::{Lesson, LessonDifficulty, LessonKind};
use services::GradedAnswer;

/// UI-ready representation of the lesson under the cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonVm {
    pub title: String,
    pub question: String,
    pub code_snippet: Option<String>,
    pub choices: Vec<String>,
    pub kind: LessonKind,
    pub difficulty_label: &'static str,
    pub reward_label: String,
}

/// The result card shown after grading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub is_correct: bool,
    pub heading: &'static str,
    pub explanation: String,
    /// XP banked by this answer, empty when it was wrong.
    pub reward_label: Option<String>,
}

#[must_use]
pub fn map_lesson(lesson: &Lesson) -> LessonVm {
    LessonVm {
        title: lesson.title().to_owned(),
        question: lesson.prompt().to_owned(),
        code_snippet: lesson.code().map(str::to_owned),
        choices: lesson.choices().to_vec(),
        kind: lesson.kind(),
        difficulty_label: difficulty_label(lesson.difficulty()),
        reward_label: format!("+{} XP", lesson.xp_reward()),
    }
}

#[must_use]
pub fn map_result(lesson: &Lesson, graded: &GradedAnswer) -> ResultVm {
    let is_correct = graded.verdict == Verdict::Correct;
    ResultVm {
        is_correct,
        heading: if is_correct { "Correct!" } else { "Not quite" },
        explanation: lesson.explanation().to_owned(),
        reward_label: is_correct.then(|| format!("+{} XP", graded.reward)),
    }
}

fn difficulty_label(difficulty: LessonDifficulty) -> &'static str {
    match difficulty {
        LessonDifficulty::Easy => "Easy",
        LessonDifficulty::Medium => "Medium",
        LessonDifficulty::Hard => "Hard",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingo_core::catalog::Catalog;
    use lingo_core::grader::Answer;
    use lingo_core::model::CourseId;

    #[test]
    fn multiple_choice_lesson_maps_choices() {
        let catalog = Catalog::builtin();
        let lesson = &catalog.lessons_for(&CourseId::new("sql"))[0];
        let vm = map_lesson(lesson);
        assert_eq!(vm.kind, LessonKind::MultipleChoice);
        assert_eq!(vm.choices.len(), 4);
        assert!(vm.code_snippet.is_none());
        assert_eq!(vm.reward_label, "+10 XP");
    }

    #[test]
    fn fill_in_lesson_carries_its_snippet() {
        let catalog = Catalog::builtin();
        let lesson = &catalog.lessons_for(&CourseId::new("sql"))[1];
        let vm = map_lesson(lesson);
        assert_eq!(vm.kind, LessonKind::FillInBlank);
        assert!(vm.choices.is_empty());
        assert!(vm.code_snippet.as_deref().unwrap().contains("_____"));
    }

    #[test]
    fn result_card_pays_out_only_when_correct() {
        let catalog = Catalog::builtin();
        let lesson = &catalog.lessons_for(&CourseId::new("sql"))[0];

        let correct = map_result(
            lesson,
            &GradedAnswer {
                answer: Answer::Choice(1),
                verdict: Verdict::Correct,
                reward: 10,
            },
        );
        assert!(correct.is_correct);
        assert_eq!(correct.reward_label.as_deref(), Some("+10 XP"));

        let wrong = map_result(
            lesson,
            &GradedAnswer {
                answer: Answer::Choice(0),
                verdict: Verdict::Incorrect,
                reward: 10,
            },
        );
        assert!(!wrong.is_correct);
        assert!(wrong.reward_label.is_none());
        assert!(!wrong.explanation.is_empty());
    }
}
