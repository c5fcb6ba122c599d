use dioxus::prelude::*;

use crate::routes;
use crate::session::use_session;
use crate::toast::use_toaster;

/// Top bar with the signed-in user's name, role and email.
#[component]
pub fn AppHeader(#[props(default = "Docdesk".to_string())] title: String) -> Element {
    let session = use_session();

    rsx! {
        header {
            class: "app-header",
            h1 { class: "app-title", "{title}" }
            if let Some(user) = session.user() {
                div {
                    class: "app-user",
                    div {
                        class: "app-user-info",
                        span { class: "app-user-name", {user.display_name()} }
                        span { class: "role-badge", "{user.role}" }
                        span { class: "app-user-email", "{user.email}" }
                    }
                    LogoutButton { class: "button button-outline" }
                }
            }
        }
    }
}

/// Clears the session and returns to the login page.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let session = use_session();
    let toaster = use_toaster();
    let nav = use_navigator();

    let onclick = move |_| {
        session.logout();
        toaster.info("Signed out");
        nav.replace(routes::LOGIN);
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
