use lingo_core::model::{CourseId, ProgressId, ProgressRecord, UserId};
use lingo_core::time::fixed_now;
use storage::repository::ProgressRepository;

use super::test_harness::{ViewKind, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_renders_course_cards() {
    let mut harness = setup_view_harness(ViewKind::Dashboard);
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Welcome back, Demo Learner!"), "missing greeting in {html}");
    assert!(html.contains("React"), "missing react card in {html}");
    assert!(html.contains("SQL"), "missing sql card in {html}");
    assert!(html.contains("Python"), "missing python card in {html}");
    assert!(html.contains("Start Course"), "missing start cta in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_renders_stats_for_stored_progress() {
    let mut harness = setup_view_harness(ViewKind::Dashboard);
    let record = ProgressRecord::from_persisted(
        ProgressId::random(),
        UserId::new("user-demo"),
        CourseId::new("sql"),
        25,
        1,
        4,
        1,
        2,
        35,
        fixed_now(),
    )
    .unwrap();
    harness
        .storage
        .progress
        .create(&record)
        .await
        .expect("create record");

    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Total XP"), "missing stats strip in {html}");
    assert!(html.contains("2/35 lessons"), "missing progress label in {html}");
    assert!(html.contains("Continue Learning"), "missing continue cta in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_shows_placeholder_until_data_arrives() {
    let mut harness = setup_view_harness(ViewKind::Dashboard);
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("Loading..."), "missing placeholder in {html}");

    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(!html.contains("Loading..."), "placeholder persisted in {html}");
    assert!(html.contains("React"), "missing react card in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_offers_sign_in_when_signed_out() {
    let mut harness = setup_view_harness(ViewKind::Dashboard);
    harness.auth.sign_out();
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(
        html.contains("Sign in to start learning"),
        "missing sign-in button in {html}"
    );
    assert!(!html.contains("Welcome back"), "unexpected greeting in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_smoke_renders_first_prompt() {
    let mut harness = setup_view_harness(ViewKind::Lesson("sql"));
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Basic SELECT Query"), "missing title in {html}");
    assert!(html.contains("Lesson 1 of 2"), "missing counter in {html}");
    assert!(html.contains("SELECT"), "missing choice in {html}");
    assert!(html.contains("Submit"), "missing submit in {html}");
    assert!(html.contains("Hearts: 5"), "missing hearts in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_smoke_reports_missing_course() {
    let mut harness = setup_view_harness(ViewKind::Lesson("haskell"));
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(
        html.contains("No lessons available"),
        "missing empty state in {html}"
    );
    assert!(html.contains("Back to Dashboard"), "missing back link in {html}");
}
