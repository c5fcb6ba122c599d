use dioxus::prelude::*;

/// Centered spinner shown while the session is being resolved.
#[component]
pub fn LoadingScreen(#[props(default = "Loading...".to_string())] message: String) -> Element {
    rsx! {
        div {
            class: "loading-screen",
            div { class: "spinner" }
            p { class: "loading-message", "{message}" }
        }
    }
}
