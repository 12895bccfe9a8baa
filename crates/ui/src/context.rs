use std::sync::Arc;

use services::{AuthService, DashboardService, LessonLoopService};

/// What the composition root must hand the views.
pub trait UiApp: Send + Sync {
    fn auth(&self) -> Arc<AuthService>;
    fn dashboard(&self) -> Arc<DashboardService>;
    fn lesson_loop(&self) -> Arc<LessonLoopService>;
}

#[derive(Clone)]
pub struct AppContext {
    auth: Arc<AuthService>,
    dashboard: Arc<DashboardService>,
    lesson_loop: Arc<LessonLoopService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            auth: app.auth(),
            dashboard: app.dashboard(),
            lesson_loop: app.lesson_loop(),
        }
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    #[must_use]
    pub fn lesson_loop(&self) -> Arc<LessonLoopService> {
        Arc::clone(&self.lesson_loop)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
