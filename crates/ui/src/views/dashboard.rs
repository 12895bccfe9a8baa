use dioxus::prelude::*;
use dioxus_router::Link;

use services::DashboardOverview;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{map_course_card, map_stats};

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let auth = ctx.auth();
    let mut auth_state = use_signal(|| auth.state());

    // Follow the auth channel for the lifetime of the view.
    let auth_for_watch = ctx.auth();
    use_future(move || {
        let auth = auth_for_watch.clone();
        async move {
            let mut sub = auth.subscribe();
            while let Some(state) = sub.changed().await {
                auth_state.set(state);
            }
        }
    });

    let dashboard = ctx.dashboard();
    let resource = use_resource(move || {
        let dashboard = dashboard.clone();
        let user = auth_state().user;
        async move {
            match user {
                Some(user) => Ok::<_, ViewError>(Some(dashboard.overview(user.id()).await)),
                None => Ok(None),
            }
        }
    });
    let state = view_state_from_resource(resource);

    let current = auth_state();
    if current.loading {
        return rsx! {
            div { class: "page dashboard-page",
                p { class: "loading", "Loading..." }
            }
        };
    }

    let Some(user) = current.user else {
        let auth_for_login = ctx.auth();
        return rsx! {
            div { class: "page dashboard-page",
                div { class: "welcome-card",
                    h1 { "CodeLingo" }
                    p { "Learn to code, one lesson at a time." }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| auth_for_login.login(),
                        "Sign in to start learning"
                    }
                }
            }
        };
    };

    let auth_for_signout = ctx.auth();
    rsx! {
        div { class: "page dashboard-page",
            header { class: "dashboard-header",
                h1 { "CodeLingo" }
                div { class: "user-chip",
                    span { class: "avatar", "{user.avatar_initial()}" }
                    span { class: "user-name", "Welcome back, {user.display_name()}!" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| auth_for_signout.sign_out(),
                        "Sign out"
                    }
                }
            }
            match state {
                ViewState::Loading => rsx! {
                    p { class: "loading", "Loading..." }
                },
                ViewState::Error(_) => rsx! {
                    p { "{ViewError::message()}" }
                },
                ViewState::Ready(None) => rsx! {
                    p { class: "loading", "Loading..." }
                },
                ViewState::Ready(Some(overview)) => rsx! {
                    DashboardBody { overview }
                },
            }
        }
    }
}

#[component]
fn DashboardBody(overview: DashboardOverview) -> Element {
    let stats = map_stats(&overview);
    let cards = overview.courses.iter().map(map_course_card);
    rsx! {
        if overview.has_progress() {
            section { class: "stats-strip",
                div { class: "stat",
                    span { class: "stat-value", "{stats.total_xp}" }
                    span { class: "stat-label", "Total XP" }
                }
                div { class: "stat",
                    span { class: "stat-value", "{stats.best_streak}" }
                    span { class: "stat-label", "Day Streak" }
                }
                div { class: "stat",
                    span { class: "stat-value", "{stats.hearts}" }
                    span { class: "stat-label", "Hearts" }
                }
                div { class: "stat",
                    span { class: "stat-value", "{stats.lessons_completed}" }
                    span { class: "stat-label", "Lessons" }
                }
            }
        } else {
            p { class: "hero", "Pick a course below to start your first lesson." }
        }
        section { class: "course-grid",
            for card in cards {
                div { class: "course-card", key: "{card.id}",
                    div { class: "course-card-top",
                        h3 { "{card.name}" }
                        span { class: "badge badge-difficulty", "{card.difficulty_label}" }
                    }
                    p { class: "course-description", "{card.description}" }
                    if card.started {
                        div { class: "progress-bar",
                            div {
                                class: "progress-fill",
                                style: "width: {card.percent}%",
                            }
                        }
                        p { class: "progress-label", "{card.progress_label}" }
                        div { class: "course-badges",
                            span { class: "badge", "{card.level_label}" }
                            span { class: "badge", "{card.xp_label}" }
                        }
                    }
                    Link {
                        class: "btn btn-primary",
                        to: Route::Lesson { course_id: card.id.clone() },
                        "{card.cta_label}"
                    }
                }
            }
        }
    }
}
