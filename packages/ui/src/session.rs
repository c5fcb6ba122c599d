//! Session context and hooks for the UI.
//!
//! [`SessionProvider`] builds the [`SessionManager`] for the configured backend,
//! restores any persisted session on mount, and shares a [`SessionHandle`]
//! through context. Views call the handle; after every call the manager's
//! state is copied into a signal so guards and headers re-render.

use std::rc::Rc;

use api::{
    ApiError, Backend, ClientConfig, CreateDocumentInput, Document, Session, SessionManager,
    SessionState, UpdateDocumentInput, User,
};
use dioxus::prelude::*;

use crate::storage::{make_storage, ClientStore};

pub type AppSession = SessionManager<Backend, ClientStore>;

/// Cheap-to-clone access to the session manager and its reactive state.
#[derive(Clone)]
pub struct SessionHandle {
    manager: Rc<AppSession>,
    state: Signal<SessionState>,
}

impl SessionHandle {
    /// Current state. Reading it subscribes the calling component.
    pub fn state(&self) -> SessionState {
        (self.state)()
    }

    pub fn user(&self) -> Option<User> {
        self.state().user().cloned()
    }

    /// Snapshot persisted by the last login, for use while restoring.
    pub fn cached_user(&self) -> Option<User> {
        self.manager.cached_user()
    }

    pub fn min_password_len(&self) -> usize {
        self.manager.min_password_len()
    }

    fn publish(&self) {
        let mut state = self.state;
        state.set(self.manager.state());
    }

    pub async fn restore(&self) -> Option<Session> {
        let mut state = self.state;
        state.set(SessionState::Restoring);
        let session = self.manager.restore().await;
        self.publish();
        session
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let result = self.manager.login(email, password).await;
        self.publish();
        result
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        confirmation: &str,
        full_name: &str,
    ) -> Result<Session, ApiError> {
        let result = self
            .manager
            .register_confirmed(email, password, confirmation, full_name)
            .await;
        self.publish();
        result
    }

    pub fn logout(&self) {
        self.manager.logout();
        self.publish();
    }

    pub async fn my_documents(&self) -> Result<Vec<Document>, ApiError> {
        let result = self.manager.my_documents().await;
        self.publish();
        result
    }

    pub async fn documents(&self) -> Result<Vec<Document>, ApiError> {
        let result = self.manager.documents().await;
        self.publish();
        result
    }

    pub async fn document(&self, id: &str) -> Result<Document, ApiError> {
        let result = self.manager.document(id).await;
        self.publish();
        result
    }

    pub async fn create_document(&self, input: &CreateDocumentInput) -> Result<Document, ApiError> {
        let result = self.manager.create_document(input).await;
        self.publish();
        result
    }

    pub async fn update_document(
        &self,
        document: &Document,
        input: &UpdateDocumentInput,
    ) -> Result<Document, ApiError> {
        let result = self.manager.update_document(document, input).await;
        self.publish();
        result
    }

    pub async fn delete_document(&self, document: &Document) -> Result<(), ApiError> {
        let result = self.manager.delete_document(document).await;
        self.publish();
        result
    }
}

/// Get the session handle provided by [`SessionProvider`].
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>()
}

/// Provider component that owns the session lifecycle.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn SessionProvider(config: ClientConfig, children: Element) -> Element {
    let state = use_signal(SessionState::default);
    let manager = use_hook(|| {
        Rc::new(
            SessionManager::new(Backend::from_config(&config), make_storage())
                .with_min_password_len(config.min_password_len),
        )
    });
    let handle = use_context_provider(|| SessionHandle { manager, state });

    // Restore the persisted session once on mount
    use_hook(move || {
        spawn(async move {
            handle.restore().await;
        })
    });

    rsx! {
        {children}
    }
}
