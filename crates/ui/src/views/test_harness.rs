use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use lingo_core::catalog::Catalog;
use lingo_core::model::{User, UserId};
use lingo_core::time::fixed_clock;
use services::{AuthService, DashboardService, LessonLoopService, ProgressService};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::{DashboardView, LessonView};

#[derive(Clone)]
struct TestApp {
    auth: Arc<AuthService>,
    dashboard: Arc<DashboardService>,
    lesson_loop: Arc<LessonLoopService>,
}

impl UiApp for TestApp {
    fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    fn lesson_loop(&self) -> Arc<LessonLoopService> {
        Arc::clone(&self.lesson_loop)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Dashboard,
    Lesson(&'static str),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Lesson(course_id) => rsx! { LessonView { course_id: course_id.to_string() } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub auth: Arc<AuthService>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn demo_user() -> User {
    User::new(
        UserId::new("user-demo"),
        "demo@codelingo.dev",
        Some("Demo Learner".to_owned()),
    )
    .expect("demo user is valid")
}

/// Build a harness around in-memory storage with the demo user signed in.
pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_storage(view, Storage::in_memory())
}

pub fn setup_view_harness_with_storage(view: ViewKind, storage: Storage) -> ViewHarness {
    let clock = fixed_clock();
    let catalog = Arc::new(Catalog::builtin());
    let auth = Arc::new(AuthService::new(demo_user()));
    auth.login();

    let progress = ProgressService::new(Arc::clone(&storage.progress), clock);
    let lesson_loop = Arc::new(LessonLoopService::new(Arc::clone(&catalog), progress));
    let dashboard = Arc::new(DashboardService::new(
        catalog,
        Arc::clone(&storage.progress),
        clock,
    ));

    let app = Arc::new(TestApp {
        auth: Arc::clone(&auth),
        dashboard,
        lesson_loop,
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness { dom, storage, auth }
}
