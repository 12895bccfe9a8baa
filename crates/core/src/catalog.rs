//! Built-in course catalog and sample lessons.
//!
//! Courses and lessons are fixture data bundled with the application; the
//! user-facing flow never writes them. A course may declare more total
//! lessons than are bundled here.

use std::collections::HashMap;

use crate::model::{
    Course, CourseDifficulty, CourseId, ExpectedAnswer, Lesson, LessonDifficulty, LessonId,
    LessonKind,
};

const COUNTER_SOLUTION: &str = "import { useState } from 'react';

function Counter() {
  const [count, setCount] = useState(0);

  return (
    <div>
      <p>Count: {count}</p>
      <button onClick={() => setCount(count + 1)}>+</button>
      <button onClick={() => setCount(count - 1)}>-</button>
    </div>
  );
}";

const BUTTON_SNIPPET: &str = "function Button() {
  const handleClick = () => {
    alert('Clicked!');
  };

  return (
    <button ___={handleClick}>
      Click me
    </button>
  );
}";

const ADD_NUMBERS_SOLUTION: &str = "def add_numbers(a, b):
    return a + b";

/// The fixed set of courses and their bundled lessons.
#[derive(Debug, Clone)]
pub struct Catalog {
    courses: Vec<Course>,
    lessons: HashMap<CourseId, Vec<Lesson>>,
}

impl Catalog {
    /// Builds the bundled catalog: react, sql, and python.
    ///
    /// # Panics
    ///
    /// Panics if a bundled fixture fails validation, which would be a bug in
    /// the fixture data itself.
    #[must_use]
    pub fn builtin() -> Self {
        let courses = vec![
            Course::new(
                CourseId::new("react"),
                "React",
                "Learn modern React development with hooks, components, and state management",
                45,
                CourseDifficulty::Intermediate,
            )
            .expect("builtin course is valid"),
            Course::new(
                CourseId::new("sql"),
                "SQL",
                "Master database queries, joins, and data manipulation",
                35,
                CourseDifficulty::Beginner,
            )
            .expect("builtin course is valid"),
            Course::new(
                CourseId::new("python"),
                "Python",
                "Build applications with Python fundamentals and advanced concepts",
                50,
                CourseDifficulty::Beginner,
            )
            .expect("builtin course is valid"),
        ];

        let mut lessons = HashMap::new();
        lessons.insert(CourseId::new("react"), react_lessons());
        lessons.insert(CourseId::new("sql"), sql_lessons());
        lessons.insert(CourseId::new("python"), python_lessons());

        Self { courses, lessons }
    }

    /// All courses in display order.
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    #[must_use]
    pub fn course(&self, id: &CourseId) -> Option<&Course> {
        self.courses.iter().find(|course| course.id() == id)
    }

    /// Ordered lessons bundled for a course; empty when none exist yet.
    #[must_use]
    pub fn lessons_for(&self, id: &CourseId) -> &[Lesson] {
        self.lessons.get(id).map_or(&[], Vec::as_slice)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn react_lessons() -> Vec<Lesson> {
    let course = CourseId::new("react");
    vec![
        Lesson::new(
            LessonId::new("react-1"),
            course.clone(),
            "React Components Basics",
            LessonKind::MultipleChoice,
            "What is the correct way to create a functional component in React?",
            None,
            vec![
                "function MyComponent() { return <div>Hello</div>; }".into(),
                "const MyComponent = () => { return <div>Hello</div>; }".into(),
                "class MyComponent extends Component { render() { return <div>Hello</div>; } }"
                    .into(),
                "Both A and B are correct".into(),
            ],
            ExpectedAnswer::Choice(3),
            "Both function declarations and arrow functions are valid ways to create \
             functional components in React.",
            10,
            LessonDifficulty::Easy,
        )
        .expect("builtin lesson is valid"),
        Lesson::new(
            LessonId::new("react-2"),
            course.clone(),
            "JSX Syntax",
            LessonKind::FillInBlank,
            "Complete the JSX code to render a button with click handler:",
            Some(BUTTON_SNIPPET.into()),
            Vec::new(),
            ExpectedAnswer::Text("onClick".into()),
            "The onClick prop is used to handle click events in React JSX.",
            15,
            LessonDifficulty::Easy,
        )
        .expect("builtin lesson is valid"),
        Lesson::new(
            LessonId::new("react-3"),
            course,
            "State Management",
            LessonKind::FreeFormCode,
            "Write a React component that manages a counter state with increment and \
             decrement buttons:",
            None,
            Vec::new(),
            ExpectedAnswer::Text(COUNTER_SOLUTION.into()),
            "This component uses the useState hook to manage counter state and provides \
             buttons to increment and decrement the value.",
            25,
            LessonDifficulty::Medium,
        )
        .expect("builtin lesson is valid"),
    ]
}

fn sql_lessons() -> Vec<Lesson> {
    let course = CourseId::new("sql");
    vec![
        Lesson::new(
            LessonId::new("sql-1"),
            course.clone(),
            "Basic SELECT Query",
            LessonKind::MultipleChoice,
            "Which SQL statement is used to retrieve data from a database?",
            None,
            vec!["GET".into(), "SELECT".into(), "RETRIEVE".into(), "FETCH".into()],
            ExpectedAnswer::Choice(1),
            "SELECT is the SQL statement used to query and retrieve data from database tables.",
            10,
            LessonDifficulty::Easy,
        )
        .expect("builtin lesson is valid"),
        Lesson::new(
            LessonId::new("sql-2"),
            course,
            "WHERE Clause",
            LessonKind::FillInBlank,
            "Complete the SQL query to select users older than 18:",
            Some("SELECT * FROM users\n_____ age > 18;".into()),
            Vec::new(),
            ExpectedAnswer::Text("WHERE".into()),
            "The WHERE clause is used to filter records based on specified conditions.",
            15,
            LessonDifficulty::Easy,
        )
        .expect("builtin lesson is valid"),
    ]
}

fn python_lessons() -> Vec<Lesson> {
    let course = CourseId::new("python");
    vec![
        Lesson::new(
            LessonId::new("python-1"),
            course.clone(),
            "Python Variables",
            LessonKind::MultipleChoice,
            "Which of the following is a valid Python variable name?",
            None,
            vec![
                "2variable".into(),
                "my-variable".into(),
                "my_variable".into(),
                "class".into(),
            ],
            ExpectedAnswer::Choice(2),
            "Python variable names can contain letters, numbers, and underscores, but \
             cannot start with a number or use hyphens.",
            10,
            LessonDifficulty::Easy,
        )
        .expect("builtin lesson is valid"),
        Lesson::new(
            LessonId::new("python-2"),
            course,
            "Python Functions",
            LessonKind::FreeFormCode,
            "Write a Python function that takes two numbers and returns their sum:",
            None,
            Vec::new(),
            ExpectedAnswer::Text(ADD_NUMBERS_SOLUTION.into()),
            "This function uses the def keyword to define a function that takes two \
             parameters and returns their sum.",
            20,
            LessonDifficulty::Easy,
        )
        .expect("builtin lesson is valid"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grader::{Answer, Verdict, grade};

    #[test]
    fn builtin_catalog_has_three_courses() {
        let catalog = Catalog::builtin();
        let ids: Vec<&str> = catalog
            .courses()
            .iter()
            .map(|course| course.id().as_str())
            .collect();
        assert_eq!(ids, ["react", "sql", "python"]);
    }

    #[test]
    fn lessons_keep_fixture_order() {
        let catalog = Catalog::builtin();
        let react = catalog.lessons_for(&CourseId::new("react"));
        assert_eq!(react.len(), 3);
        assert_eq!(react[0].id().as_str(), "react-1");
        assert_eq!(react[2].kind(), LessonKind::FreeFormCode);

        let sql = catalog.lessons_for(&CourseId::new("sql"));
        assert_eq!(sql.len(), 2);
        assert_eq!(sql[0].xp_reward(), 10);
    }

    #[test]
    fn unknown_course_has_no_lessons() {
        let catalog = Catalog::builtin();
        assert!(catalog.lessons_for(&CourseId::new("haskell")).is_empty());
        assert!(catalog.course(&CourseId::new("haskell")).is_none());
    }

    #[test]
    fn sql_first_lesson_grades_index_one_correct() {
        let catalog = Catalog::builtin();
        let lesson = &catalog.lessons_for(&CourseId::new("sql"))[0];
        assert_eq!(grade(lesson, &Answer::Choice(1)), Verdict::Correct);
        assert_eq!(grade(lesson, &Answer::Choice(0)), Verdict::Incorrect);
    }

    #[test]
    fn react_code_writing_requires_verbatim_solution() {
        let catalog = Catalog::builtin();
        let lesson = &catalog.lessons_for(&CourseId::new("react"))[2];
        assert_eq!(
            grade(lesson, &Answer::Text("function Counter() {}".into())),
            Verdict::Incorrect
        );
        let ExpectedAnswer::Text(solution) = lesson.expected() else {
            panic!("expected text answer");
        };
        assert_eq!(
            grade(lesson, &Answer::Text(solution.clone())),
            Verdict::Correct
        );
    }

    #[test]
    fn declared_totals_cover_bundled_lessons() {
        let catalog = Catalog::builtin();
        for course in catalog.courses() {
            let bundled = catalog.lessons_for(course.id()).len();
            assert!(course.total_lessons() as usize >= bundled);
        }
    }
}
