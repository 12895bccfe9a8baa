use dioxus::prelude::*;
use dioxus_router::Link;

use lingo_core::grader::Answer;
use lingo_core::model::{CourseId, LessonKind};
use services::AnswerState;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{ResultVm, map_lesson, map_result};

#[component]
pub fn LessonView(course_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let course = CourseId::new(course_id);

    let mut session = use_signal({
        let lesson_loop = ctx.lesson_loop();
        let course = course.clone();
        move || lesson_loop.start(course.clone()).ok()
    });
    let mut selected = use_signal(|| None::<usize>);
    let mut text = use_signal(String::new);

    let auth_for_submit = ctx.auth();
    let loop_for_submit = ctx.lesson_loop();
    let course_for_submit = course.clone();
    let on_submit = move |_| {
        let graded = {
            let mut guard = session.write();
            let Some(sess) = guard.as_mut() else {
                return;
            };
            let answer = match sess.current_lesson().map(|lesson| lesson.kind()) {
                Some(LessonKind::MultipleChoice) => {
                    let Some(index) = selected() else {
                        return;
                    };
                    Answer::Choice(index)
                }
                Some(LessonKind::FillInBlank | LessonKind::FreeFormCode) => {
                    let value = text();
                    if value.trim().is_empty() {
                        return;
                    }
                    Answer::Text(value)
                }
                None => return,
            };
            sess.submit(answer).ok().cloned()
        };
        // Grading already happened; persistence runs in the background and
        // must never block or fail the lesson flow.
        if let Some(graded) = graded
            && let Some(user) = auth_for_submit.state().user
        {
            let lesson_loop = loop_for_submit.clone();
            let course = course_for_submit.clone();
            spawn(async move {
                let _ = lesson_loop
                    .persist_outcome(user.id(), &course, graded.verdict, graded.reward)
                    .await;
            });
        }
    };

    let on_retry = move |_| {
        if let Some(sess) = session.write().as_mut() {
            let _ = sess.retry();
        }
        selected.set(None);
        text.set(String::new());
    };

    let on_advance = move |_| {
        if let Some(sess) = session.write().as_mut() {
            let _ = sess.advance();
        }
        selected.set(None);
        text.set(String::new());
    };

    let guard = session.read();
    let Some(sess) = guard.as_ref() else {
        return rsx! {
            div { class: "page lesson-page",
                div { class: "empty-card",
                    h2 { "No lessons available" }
                    p { "This course has no lessons yet. Check back soon!" }
                    Link { class: "btn btn-primary", to: Route::Dashboard {}, "Back to Dashboard" }
                }
            }
        };
    };

    if sess.is_complete() {
        let xp_earned = sess.xp_earned();
        return rsx! {
            div { class: "page lesson-page",
                div { class: "complete-card",
                    h2 { "Course Complete!" }
                    p { "You earned {xp_earned} XP this run." }
                    Link { class: "btn btn-primary", to: Route::Dashboard {}, "Back to Dashboard" }
                }
            }
        };
    }

    let progress = sess.progress();
    let hearts = sess.hearts();
    let xp_earned = sess.xp_earned();
    let percent = progress.percent();
    let lesson_number = progress.index + 1;
    let is_last = lesson_number == progress.total;
    let lesson = sess
        .current_lesson()
        .expect("session that is not complete has a current lesson");
    let vm = map_lesson(lesson);
    let result = match sess.answer_state() {
        AnswerState::Graded(graded) => Some(map_result(lesson, graded)),
        AnswerState::Unanswered => None,
    };
    let graded_choice = match sess.answer_state() {
        AnswerState::Graded(graded) => match &graded.answer {
            Answer::Choice(index) => Some(*index),
            Answer::Text(_) => None,
        },
        AnswerState::Unanswered => None,
    };
    let is_graded = result.is_some();
    let can_submit = match vm.kind {
        LessonKind::MultipleChoice => selected().is_some(),
        LessonKind::FillInBlank | LessonKind::FreeFormCode => !text().trim().is_empty(),
    };

    rsx! {
        div { class: "page lesson-page",
            header { class: "lesson-header",
                Link { class: "btn-link", to: Route::Dashboard {}, "Exit" }
                div { class: "progress-bar",
                    div { class: "progress-fill", style: "width: {percent}%" }
                }
                span { class: "lesson-counter", "Lesson {lesson_number} of {progress.total}" }
                span { class: "hearts", "Hearts: {hearts}" }
                span { class: "session-xp", "{xp_earned} XP" }
            }
            section { class: "lesson-card",
                div { class: "lesson-card-top",
                    h2 { "{vm.title}" }
                    span { class: "badge", "{vm.difficulty_label}" }
                    span { class: "badge badge-xp", "{vm.reward_label}" }
                }
                p { class: "lesson-question", "{vm.question}" }
                if let Some(snippet) = vm.code_snippet.as_ref() {
                    pre { class: "code-snippet", code { "{snippet}" } }
                }
                match vm.kind {
                    LessonKind::MultipleChoice => rsx! {
                        div { class: "choices",
                            for (index, choice) in vm.choices.iter().enumerate() {
                                button {
                                    key: "{index}",
                                    class: choice_class(index, selected(), graded_choice, &result),
                                    r#type: "button",
                                    disabled: is_graded,
                                    onclick: move |_| selected.set(Some(index)),
                                    "{choice}"
                                }
                            }
                        }
                    },
                    LessonKind::FillInBlank => rsx! {
                        input {
                            class: "answer-input",
                            r#type: "text",
                            placeholder: "Type your answer",
                            disabled: is_graded,
                            value: "{text}",
                            oninput: move |event| text.set(event.value()),
                        }
                    },
                    LessonKind::FreeFormCode => rsx! {
                        textarea {
                            class: "answer-editor",
                            rows: 12,
                            placeholder: "Write your code here",
                            disabled: is_graded,
                            value: "{text}",
                            oninput: move |event| text.set(event.value()),
                        }
                    },
                }
                match result {
                    None => rsx! {
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            disabled: !can_submit,
                            onclick: on_submit,
                            "Submit"
                        }
                    },
                    Some(result) => rsx! {
                        div {
                            class: if result.is_correct { "result-card result-correct" } else { "result-card result-incorrect" },
                            h3 { "{result.heading}" }
                            if let Some(reward) = result.reward_label.as_ref() {
                                span { class: "badge badge-xp", "{reward}" }
                            }
                            p { class: "explanation", "{result.explanation}" }
                            if result.is_correct {
                                button {
                                    class: "btn btn-primary",
                                    r#type: "button",
                                    onclick: on_advance,
                                    if is_last { "Finish Course" } else { "Next Lesson" }
                                }
                            } else {
                                button {
                                    class: "btn btn-secondary",
                                    r#type: "button",
                                    onclick: on_retry,
                                    "Try Again"
                                }
                            }
                        }
                    },
                }
            }
        }
    }
}

fn choice_class(
    index: usize,
    selected: Option<usize>,
    graded_choice: Option<usize>,
    result: &Option<ResultVm>,
) -> &'static str {
    if let (Some(answered), Some(result)) = (graded_choice, result.as_ref()) {
        if answered == index {
            return if result.is_correct {
                "choice choice-correct"
            } else {
                "choice choice-incorrect"
            };
        }
        return "choice";
    }
    if selected == Some(index) {
        "choice choice-selected"
    } else {
        "choice"
    }
}
