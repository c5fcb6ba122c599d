use api::ClientConfig;
use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::{SessionProvider, ToastProvider};
use views::{Dashboard, Home, Login, Register};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[route("/dashboard")]
    Dashboard {},
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    if let Err(e) = dioxus::logger::init(Level::INFO) {
        eprintln!("Failed to initialise logger: {e}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(|| {
        let config = ClientConfig::from_env();
        tracing::info!(
            "Docdesk starting with {:?} backend at {}",
            config.backend,
            config.base_url()
        );
        config
    });

    rsx! {
        // Global app resources
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        SessionProvider {
            config,
            ToastProvider {
                Router::<Route> {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_match_guard_paths() {
        assert_eq!(Route::Home {}.to_string(), ui::routes::HOME);
        assert_eq!(Route::Login {}.to_string(), ui::routes::LOGIN);
        assert_eq!(Route::Register {}.to_string(), ui::routes::REGISTER);
        assert_eq!(Route::Dashboard {}.to_string(), ui::routes::DASHBOARD);
    }

    #[test]
    fn test_unknown_path_does_not_parse() {
        assert!("/notes".parse::<Route>().is_err());
        assert!(matches!("/dashboard".parse::<Route>(), Ok(Route::Dashboard {})));
    }
}
