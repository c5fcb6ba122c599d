//! Landing page for signed-in users.

use dioxus::prelude::*;
use ui::{format_date, use_session, AppHeader, LogoutButton, ProtectedRoute};

use crate::Route;

#[component]
pub fn Home() -> Element {
    rsx! {
        ProtectedRoute {
            HomeContent {}
        }
    }
}

#[component]
fn HomeContent() -> Element {
    let session = use_session();
    let Some(user) = session.user() else {
        return rsx! {};
    };
    let member_since = format_date(&user.created_at);

    rsx! {
        AppHeader {}
        main {
            class: "page",
            section {
                class: "welcome",
                h2 { "Welcome, {user.full_name}" }
                p { class: "muted", "Manage your documents from the dashboard." }
            }

            div {
                class: "card-row",
                div {
                    class: "card",
                    h3 { "Profile" }
                    dl {
                        class: "profile",
                        dt { "Email" }
                        dd { "{user.email}" }
                        dt { "Role" }
                        dd { span { class: "role-badge", "{user.role}" } }
                        dt { "Member since" }
                        dd { "{member_since}" }
                    }
                }

                div {
                    class: "card",
                    h3 { "Quick actions" }
                    div {
                        class: "actions",
                        Link {
                            class: "button button-primary",
                            to: Route::Dashboard {},
                            "Go to dashboard"
                        }
                        LogoutButton { class: "button button-outline", label: "Sign out" }
                    }
                }
            }
        }
    }
}
