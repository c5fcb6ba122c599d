//! # Session manager
//!
//! [`SessionManager`] owns the client-side authentication lifecycle:
//!
//! ```text
//! Unknown ──restore()──▶ Restoring ──┬──▶ Authenticated ──logout() / 401──▶ Anonymous
//!                                    └──▶ Anonymous ──login() / register()──▶ Authenticated
//! ```
//!
//! A session is persisted under two [`KeyValueStore`] keys,
//! [`ACCESS_TOKEN_KEY`] and [`USER_KEY`], and mirrored into the backend's
//! [`BearerToken`] so every outbound call carries it.
//!
//! Authenticated calls go through [`SessionManager::guarded`]. When a backend
//! answers [`ApiError::Unauthenticated`] the manager tears the session down
//! itself; the transport never touches session state.

use std::future::Future;
use std::sync::{Mutex, PoisonError};

use store::KeyValueStore;

use crate::backend::DocumentBackend;
use crate::error::ApiError;
use crate::models::{
    AuthResponse, CreateDocumentInput, Credentials, Document, Registration, UpdateDocumentInput,
    User,
};
use crate::validation;

/// Storage key for the bearer token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Storage key for the JSON user snapshot.
pub const USER_KEY: &str = "user";

/// Default minimum password length for registration.
pub const DEFAULT_MIN_PASSWORD_LEN: usize = 6;

/// Proof of authentication plus the cached profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Where the session lifecycle currently stands.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    /// Nothing has been checked yet.
    #[default]
    Unknown,
    /// A stored token is being validated against the backend.
    Restoring,
    Authenticated(Session),
    Anonymous,
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.session().map(|s| &s.user)
    }

    /// Whether the state is final (authenticated or anonymous).
    pub fn is_resolved(&self) -> bool {
        matches!(
            self,
            SessionState::Authenticated(_) | SessionState::Anonymous
        )
    }
}

pub struct SessionManager<B, S> {
    backend: B,
    storage: S,
    state: Mutex<SessionState>,
    min_password_len: usize,
}

impl<B: DocumentBackend, S: KeyValueStore> SessionManager<B, S> {
    /// Create a manager in the [`SessionState::Unknown`] state.
    pub fn new(backend: B, storage: S) -> Self {
        Self {
            backend,
            storage,
            state: Mutex::new(SessionState::Unknown),
            min_password_len: DEFAULT_MIN_PASSWORD_LEN,
        }
    }

    /// Builder method to set the registration password length floor.
    pub fn with_min_password_len(mut self, len: usize) -> Self {
        self.min_password_len = len;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn min_password_len(&self) -> usize {
        self.min_password_len
    }

    pub fn state(&self) -> SessionState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state().user().cloned()
    }

    fn set_state(&self, state: SessionState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// The user snapshot persisted by the last login, if any.
    ///
    /// Only useful for painting something while [`restore`](Self::restore)
    /// runs; the profile endpoint stays authoritative.
    pub fn cached_user(&self) -> Option<User> {
        self.storage.get_json(USER_KEY)
    }

    /// Re-establish a persisted session. Run once at startup.
    ///
    /// Resolves to `None` (and clears storage) when there is no token or the
    /// backend rejects it. Never fails.
    pub async fn restore(&self) -> Option<Session> {
        self.set_state(SessionState::Restoring);

        let Some(token) = self.storage.get(ACCESS_TOKEN_KEY) else {
            tracing::debug!("No stored token, starting anonymous");
            self.set_state(SessionState::Anonymous);
            return None;
        };

        self.backend.token().set(token.clone());
        match self.backend.current_user().await {
            Ok(user) => {
                if let Err(e) = self.storage.set_json(USER_KEY, &user) {
                    tracing::warn!("Failed to refresh cached user: {e}");
                }
                tracing::info!("Restored session for {}", user.email);
                let session = Session { token, user };
                self.set_state(SessionState::Authenticated(session.clone()));
                Some(session)
            }
            Err(e) => {
                tracing::warn!("Discarding stored session: {e}");
                self.teardown();
                None
            }
        }
    }

    /// Sign in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        validation::validate_login(email, password)?;
        let credentials = Credentials {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        match self.backend.login(&credentials).await {
            Ok(response) => self.establish(response),
            Err(e) => {
                tracing::warn!("Login failed for {}: {e}", credentials.email);
                Err(e)
            }
        }
    }

    /// Create an account and sign in.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<Session, ApiError> {
        validation::validate_registration(email, password, full_name, self.min_password_len)?;
        let registration = Registration {
            email: email.trim().to_string(),
            password: password.to_string(),
            full_name: full_name.trim().to_string(),
        };
        match self.backend.register(&registration).await {
            Ok(response) => self.establish(response),
            Err(e) => {
                tracing::warn!("Registration failed for {}: {e}", registration.email);
                Err(e)
            }
        }
    }

    /// [`register`](Self::register) for forms with a confirmation field.
    pub async fn register_confirmed(
        &self,
        email: &str,
        password: &str,
        confirmation: &str,
        full_name: &str,
    ) -> Result<Session, ApiError> {
        validation::validate_registration(email, password, full_name, self.min_password_len)?;
        validation::validate_confirmation(password, confirmation)?;
        self.register(email, password, full_name).await
    }

    fn establish(&self, response: AuthResponse) -> Result<Session, ApiError> {
        let AuthResponse { access_token, user } = response;
        let persisted = self
            .storage
            .set(ACCESS_TOKEN_KEY, &access_token)
            .and_then(|()| self.storage.set_json(USER_KEY, &user));
        if let Err(e) = persisted {
            tracing::error!("Failed to persist session: {e}");
            self.teardown();
            return Err(e.into());
        }

        self.backend.token().set(access_token.clone());
        tracing::info!("Signed in as {} ({})", user.email, user.role);
        let session = Session {
            token: access_token,
            user,
        };
        self.set_state(SessionState::Authenticated(session.clone()));
        Ok(session)
    }

    /// Sign out. Local only: no request is made.
    pub fn logout(&self) {
        if let Some(user) = self.current_user() {
            tracing::info!("Signing out {}", user.email);
        }
        self.teardown();
    }

    /// Forget the session: storage, bearer token and in-memory state.
    pub fn teardown(&self) {
        self.storage.remove(ACCESS_TOKEN_KEY);
        self.storage.remove(USER_KEY);
        self.backend.token().clear();
        self.set_state(SessionState::Anonymous);
    }

    /// Run an authenticated backend call.
    ///
    /// Fails fast with [`ApiError::Unauthenticated`] when there is no
    /// session, and tears the session down when the backend rejects the token.
    pub async fn guarded<'a, T, F, Fut>(&'a self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&'a B) -> Fut,
        Fut: Future<Output = Result<T, ApiError>> + 'a,
    {
        if self.state().session().is_none() {
            return Err(ApiError::Unauthenticated);
        }
        let result = op(&self.backend).await;
        if let Err(ApiError::Unauthenticated) = &result {
            tracing::warn!("Backend rejected the session token, signing out");
            self.teardown();
        }
        result
    }

    pub async fn documents(&self) -> Result<Vec<Document>, ApiError> {
        self.guarded(|b| b.documents()).await
    }

    pub async fn my_documents(&self) -> Result<Vec<Document>, ApiError> {
        self.guarded(|b| b.my_documents()).await
    }

    pub async fn document(&self, id: &str) -> Result<Document, ApiError> {
        self.guarded(|b| b.document(id)).await
    }

    pub async fn create_document(&self, input: &CreateDocumentInput) -> Result<Document, ApiError> {
        validation::validate_new_document(input)?;
        let document = self.guarded(|b| b.create_document(input)).await?;
        tracing::info!("Created document {}", document.id);
        Ok(document)
    }

    /// Edit a document the current user owns, or any document for ADMIN.
    pub async fn update_document(
        &self,
        document: &Document,
        input: &UpdateDocumentInput,
    ) -> Result<Document, ApiError> {
        if input.id != document.id {
            return Err(ApiError::validation("The update targets a different document"));
        }
        validation::validate_update(input)?;
        let user = self.current_user().ok_or(ApiError::Unauthenticated)?;
        if !user.can_manage(document) {
            return Err(ApiError::Forbidden);
        }
        let updated = self.guarded(|b| b.update_document(input)).await?;
        tracing::info!("Updated document {}", updated.id);
        Ok(updated)
    }

    /// Delete a document the current user owns, or any document for ADMIN.
    pub async fn delete_document(&self, document: &Document) -> Result<(), ApiError> {
        let user = self.current_user().ok_or(ApiError::Unauthenticated)?;
        if !user.can_manage(document) {
            return Err(ApiError::Forbidden);
        }
        self.guarded(|b| b.delete_document(&document.id)).await?;
        tracing::info!("Deleted document {}", document.id);
        Ok(())
    }
}
