//! Route guard: gates a view on session presence and, optionally, on role.

use api::{Role, SessionState};
use dioxus::prelude::*;

use crate::routes;
use crate::session::use_session;
use crate::views::LoadingScreen;

/// What a guarded view should do for a given session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// The session is still being resolved.
    Loading,
    Render,
    Redirect(&'static str),
}

/// Decide how to treat a guarded view. ADMIN satisfies every role.
pub fn evaluate(state: &SessionState, required_role: Option<Role>) -> GuardOutcome {
    match state {
        SessionState::Unknown | SessionState::Restoring => GuardOutcome::Loading,
        SessionState::Anonymous => GuardOutcome::Redirect(routes::LOGIN),
        SessionState::Authenticated(session) => match required_role {
            Some(role) if !session.user.role.satisfies(role) => {
                GuardOutcome::Redirect(routes::FALLBACK)
            }
            _ => GuardOutcome::Render,
        },
    }
}

/// Renders `children` only for a signed-in user holding `required_role`.
#[component]
pub fn ProtectedRoute(required_role: Option<Role>, children: Element) -> Element {
    let session = use_session();
    let nav = use_navigator();

    match evaluate(&session.state(), required_role) {
        GuardOutcome::Loading => {
            let message = match session.cached_user() {
                Some(user) => format!("Welcome back, {}...", user.display_name()),
                None => "Checking your session...".to_string(),
            };
            rsx! {
                LoadingScreen { message }
            }
        }
        GuardOutcome::Render => rsx! {
            {children}
        },
        GuardOutcome::Redirect(path) => {
            tracing::debug!("Guard redirecting to {path}");
            nav.replace(path);
            rsx! {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{Session, User};

    fn signed_in(role: Role) -> SessionState {
        SessionState::Authenticated(Session {
            token: "tok".to_string(),
            user: User {
                id: "u1".to_string(),
                email: "a@b.com".to_string(),
                full_name: "A B".to_string(),
                role,
                created_at: "now".to_string(),
            },
        })
    }

    #[test]
    fn test_loading_while_unresolved() {
        assert_eq!(evaluate(&SessionState::Unknown, None), GuardOutcome::Loading);
        assert_eq!(
            evaluate(&SessionState::Restoring, Some(Role::Admin)),
            GuardOutcome::Loading
        );
    }

    #[test]
    fn test_anonymous_goes_to_login() {
        assert_eq!(
            evaluate(&SessionState::Anonymous, None),
            GuardOutcome::Redirect("/login")
        );
        assert_eq!(
            evaluate(&SessionState::Anonymous, Some(Role::Admin)),
            GuardOutcome::Redirect("/login")
        );
    }

    #[test]
    fn test_admin_required() {
        assert_eq!(
            evaluate(&signed_in(Role::User), Some(Role::Admin)),
            GuardOutcome::Redirect(routes::FALLBACK)
        );
        assert_eq!(
            evaluate(&signed_in(Role::Admin), Some(Role::Admin)),
            GuardOutcome::Render
        );
    }

    #[test]
    fn test_admin_satisfies_user_role() {
        assert_eq!(
            evaluate(&signed_in(Role::Admin), Some(Role::User)),
            GuardOutcome::Render
        );
        assert_eq!(
            evaluate(&signed_in(Role::User), Some(Role::User)),
            GuardOutcome::Render
        );
        assert_eq!(evaluate(&signed_in(Role::User), None), GuardOutcome::Render);
    }
}
