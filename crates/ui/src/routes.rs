use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::{DashboardView, LessonView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/lesson/:course_id", LessonView)] Lesson { course_id: String },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
