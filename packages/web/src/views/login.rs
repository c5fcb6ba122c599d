//! Login page view with email/password form.

use api::{ApiError, SessionState};
use dioxus::prelude::*;
use ui::{use_session, use_toaster};

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let session = use_session();
    let toaster = use_toaster();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // If already logged in, go straight to the dashboard
    if let SessionState::Authenticated(_) = session.state() {
        nav.replace(Route::Dashboard {});
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let session = session.clone();
        spawn(async move {
            error.set(None);
            loading.set(true);
            match session.login(&email(), &password()).await {
                Ok(signed_in) => {
                    loading.set(false);
                    toaster.success(format!("Welcome, {}", signed_in.user.display_name()));
                    nav.replace(Route::Dashboard {});
                }
                Err(e) => {
                    loading.set(false);
                    if !matches!(e, ApiError::Validation(_)) {
                        toaster.error(e.user_message());
                    }
                    error.set(Some(e.user_message()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",

            h1 { class: "auth-title", "Sign in" }
            p { class: "auth-subtitle", "Access your documents" }

            form {
                onsubmit: handle_login,
                class: "form auth-form",

                if let Some(err) = error() {
                    div { class: "form-error", "{err}" }
                }

                input {
                    r#type: "email",
                    placeholder: "Email",
                    autocomplete: "email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                input {
                    r#type: "password",
                    placeholder: "Password",
                    autocomplete: "current-password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                button {
                    class: "button button-primary button-block",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Sign in" }
                }
            }

            p {
                class: "auth-switch",
                "Don't have an account? "
                Link { to: Route::Register {}, "Create one" }
            }
        }
    }
}
