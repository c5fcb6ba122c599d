//! # In-memory backend
//!
//! [`MemoryBackend`] emulates the remote API inside the process: accounts,
//! bearer tokens, document ownership and the ADMIN override. It answers with
//! the same [`ApiError`] variants the network bindings produce, so session and
//! view logic can be exercised without a server.
//!
//! Clones share state *and* the token handle. [`MemoryBackend::reconnect`]
//! shares state with a fresh token handle, which is what a page reload looks
//! like to the backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{SecondsFormat, Utc};

use super::{BearerToken, DocumentBackend};
use crate::error::ApiError;
use crate::models::{
    AuthResponse, CreateDocumentInput, Credentials, Document, DocumentFile, Registration, Role,
    UpdateDocumentInput, User, UserSummary,
};

#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
    token: BearerToken,
}

#[derive(Debug, Default)]
struct MemoryState {
    accounts: Vec<Account>,
    /// token -> user id
    sessions: HashMap<String, String>,
    documents: Vec<Document>,
    next_id: u64,
}

#[derive(Debug)]
struct Account {
    user: User,
    password: String,
}

impl MemoryState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    fn add_account(&mut self, email: &str, password: &str, full_name: &str, role: Role) -> User {
        let user = User {
            id: self.next_id("user"),
            email: email.trim().to_lowercase(),
            full_name: full_name.trim().to_string(),
            role,
            created_at: now(),
        };
        self.accounts.push(Account {
            user: user.clone(),
            password: password.to_string(),
        });
        user
    }

    fn issue_token(&mut self, user: &User) -> String {
        let token = self.next_id("token");
        self.sessions.insert(token.clone(), user.id.clone());
        token
    }

    fn authenticate(&self, token: Option<String>) -> Result<User, ApiError> {
        let user_id = token
            .and_then(|t| self.sessions.get(&t).cloned())
            .ok_or(ApiError::Unauthenticated)?;
        self.accounts
            .iter()
            .find(|a| a.user.id == user_id)
            .map(|a| a.user.clone())
            .ok_or(ApiError::Unauthenticated)
    }

    fn document_index(&self, id: &str) -> Result<usize, ApiError> {
        self.documents
            .iter()
            .position(|d| d.id == id)
            .ok_or(ApiError::NotFound)
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn summary(user: &User) -> UserSummary {
    UserSummary {
        id: user.id.clone(),
        email: user.email.clone(),
        full_name: user.full_name.clone(),
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an ADMIN account.
    pub fn with_admin(self, email: &str, password: &str, full_name: &str) -> Self {
        self.with_state(|state| state.add_account(email, password, full_name, Role::Admin));
        self
    }

    /// A handle on the same accounts and documents with its own token slot.
    pub fn reconnect(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            token: BearerToken::default(),
        }
    }

    /// Invalidate every issued token, as an expiry or server restart would.
    pub fn revoke_all_tokens(&self) {
        self.with_state(|state| state.sessions.clear());
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut MemoryState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    fn caller(&self, state: &MemoryState) -> Result<User, ApiError> {
        state.authenticate(self.token.get())
    }
}

impl DocumentBackend for MemoryBackend {
    fn token(&self) -> &BearerToken {
        &self.token
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        let email = credentials.email.trim().to_lowercase();
        self.with_state(|state| {
            let user = state
                .accounts
                .iter()
                .find(|a| a.user.email == email && a.password == credentials.password)
                .map(|a| a.user.clone())
                .ok_or_else(|| ApiError::Auth("Invalid email or password".to_string()))?;
            let access_token = state.issue_token(&user);
            Ok(AuthResponse { access_token, user })
        })
    }

    async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        let email = registration.email.trim().to_lowercase();
        self.with_state(|state| {
            if state.accounts.iter().any(|a| a.user.email == email) {
                return Err(ApiError::validation(
                    "An account with this email already exists",
                ));
            }
            let user = state.add_account(
                &email,
                &registration.password,
                &registration.full_name,
                Role::User,
            );
            let access_token = state.issue_token(&user);
            Ok(AuthResponse { access_token, user })
        })
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.with_state(|state| self.caller(state))
    }

    async fn documents(&self) -> Result<Vec<Document>, ApiError> {
        self.with_state(|state| {
            let caller = self.caller(state)?;
            Ok(state
                .documents
                .iter()
                .filter(|d| caller.can_manage(d))
                .cloned()
                .collect())
        })
    }

    async fn my_documents(&self) -> Result<Vec<Document>, ApiError> {
        self.with_state(|state| {
            let caller = self.caller(state)?;
            Ok(state
                .documents
                .iter()
                .filter(|d| d.user_id == caller.id)
                .cloned()
                .collect())
        })
    }

    async fn document(&self, id: &str) -> Result<Document, ApiError> {
        self.with_state(|state| {
            let caller = self.caller(state)?;
            let document = &state.documents[state.document_index(id)?];
            if !caller.can_manage(document) {
                return Err(ApiError::Forbidden);
            }
            Ok(document.clone())
        })
    }

    async fn create_document(&self, input: &CreateDocumentInput) -> Result<Document, ApiError> {
        self.with_state(|state| {
            let caller = self.caller(state)?;
            let id = state.next_id("doc");
            let file_url = match &input.file {
                DocumentFile::Url(url) => url.trim().to_string(),
                DocumentFile::Upload { file_name, .. } => format!("memory://{id}/{file_name}"),
            };
            let document = Document {
                id,
                title: input.title.trim().to_string(),
                description: input.description.trim().to_string(),
                file_url,
                user_id: caller.id.clone(),
                user: Some(summary(&caller)),
                created_at: now(),
                updated_at: None,
            };
            state.documents.push(document.clone());
            Ok(document)
        })
    }

    async fn update_document(&self, input: &UpdateDocumentInput) -> Result<Document, ApiError> {
        self.with_state(|state| {
            let caller = self.caller(state)?;
            let index = state.document_index(&input.id)?;
            let document = &mut state.documents[index];
            if !caller.can_manage(document) {
                return Err(ApiError::Forbidden);
            }
            if let Some(title) = &input.title {
                document.title = title.clone();
            }
            if let Some(description) = &input.description {
                document.description = description.clone();
            }
            if let Some(file_url) = &input.file_url {
                document.file_url = file_url.clone();
            }
            document.updated_at = Some(now());
            Ok(document.clone())
        })
    }

    async fn delete_document(&self, id: &str) -> Result<(), ApiError> {
        self.with_state(|state| {
            let caller = self.caller(state)?;
            let index = state.document_index(id)?;
            if !caller.can_manage(&state.documents[index]) {
                return Err(ApiError::Forbidden);
            }
            state.documents.remove(index);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(email: &str) -> Registration {
        Registration {
            email: email.to_string(),
            password: "secret1".to_string(),
            full_name: "A B".to_string(),
        }
    }

    async fn signed_in(backend: &MemoryBackend, email: &str) -> User {
        let response = backend.register(&registration(email)).await.unwrap();
        backend.token().set(response.access_token);
        response.user
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let backend = MemoryBackend::new();
        let registered = backend.register(&registration("A@B.com")).await.unwrap();
        assert_eq!(registered.user.email, "a@b.com");
        assert_eq!(registered.user.role, Role::User);

        let logged_in = backend
            .login(&Credentials {
                email: "a@b.com".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(logged_in.user, registered.user);
        assert_ne!(logged_in.access_token, registered.access_token);
    }

    #[tokio::test]
    async fn test_duplicate_registration_rejected() {
        let backend = MemoryBackend::new();
        backend.register(&registration("a@b.com")).await.unwrap();
        let err = backend.register(&registration("a@b.com")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_wrong_password_is_auth_error() {
        let backend = MemoryBackend::new();
        backend.register(&registration("a@b.com")).await.unwrap();
        let err = backend
            .login(&Credentials {
                email: "a@b.com".to_string(),
                password: "nope".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Auth("Invalid email or password".to_string()));
    }

    #[tokio::test]
    async fn test_calls_without_token_are_unauthenticated() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.current_user().await, Err(ApiError::Unauthenticated));
        assert_eq!(backend.my_documents().await, Err(ApiError::Unauthenticated));

        backend.token().set("forged");
        assert_eq!(backend.current_user().await, Err(ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_create_and_list_own_documents() {
        let backend = MemoryBackend::new();
        let user = signed_in(&backend, "a@b.com").await;

        let doc = backend
            .create_document(&CreateDocumentInput::link("T", "D", "https://x/y.pdf"))
            .await
            .unwrap();
        assert_eq!(doc.user_id, user.id);
        assert!(doc.owner_consistent());

        let mine = backend.my_documents().await.unwrap();
        assert_eq!(mine, vec![doc.clone()]);
        assert_eq!(backend.document(&doc.id).await.unwrap(), doc);
    }

    #[tokio::test]
    async fn test_ownership_enforced_and_admin_overrides() {
        let backend = MemoryBackend::new().with_admin("root@b.com", "rootpass", "Root");
        signed_in(&backend, "owner@b.com").await;
        let doc = backend
            .create_document(&CreateDocumentInput::link("T", "D", "https://x/y.pdf"))
            .await
            .unwrap();

        let other = backend.reconnect();
        signed_in(&other, "other@b.com").await;
        assert_eq!(other.document(&doc.id).await, Err(ApiError::Forbidden));
        assert_eq!(other.delete_document(&doc.id).await, Err(ApiError::Forbidden));
        assert!(other.documents().await.unwrap().is_empty());

        let admin = backend.reconnect();
        let response = admin
            .login(&Credentials {
                email: "root@b.com".to_string(),
                password: "rootpass".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(response.user.role, Role::Admin);
        admin.token().set(response.access_token);
        assert_eq!(admin.documents().await.unwrap().len(), 1);
        assert!(admin.my_documents().await.unwrap().is_empty());
        admin.delete_document(&doc.id).await.unwrap();
        assert_eq!(backend.document(&doc.id).await, Err(ApiError::NotFound));
    }

    #[tokio::test]
    async fn test_update_document() {
        let backend = MemoryBackend::new();
        signed_in(&backend, "a@b.com").await;
        let doc = backend
            .create_document(&CreateDocumentInput::link("T", "D", "https://x/y.pdf"))
            .await
            .unwrap();

        let updated = backend
            .update_document(&UpdateDocumentInput {
                id: doc.id.clone(),
                title: Some("T2".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.title, "T2");
        assert_eq!(updated.description, "D");
        assert!(updated.updated_at.is_some());

        let missing = backend
            .update_document(&UpdateDocumentInput {
                id: "doc-999".to_string(),
                ..Default::default()
            })
            .await;
        assert_eq!(missing, Err(ApiError::NotFound));
    }

    #[tokio::test]
    async fn test_revoked_tokens() {
        let backend = MemoryBackend::new();
        signed_in(&backend, "a@b.com").await;
        assert!(backend.current_user().await.is_ok());

        backend.revoke_all_tokens();
        assert_eq!(backend.current_user().await, Err(ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_upload_gets_synthetic_url() {
        let backend = MemoryBackend::new();
        signed_in(&backend, "a@b.com").await;
        let doc = backend
            .create_document(&CreateDocumentInput {
                title: "T".to_string(),
                description: "D".to_string(),
                file: DocumentFile::Upload {
                    file_name: "y.pdf".to_string(),
                    content_type: "application/pdf".to_string(),
                    bytes: vec![1, 2, 3],
                },
            })
            .await
            .unwrap();
        assert_eq!(doc.file_url, format!("memory://{}/y.pdf", doc.id));
    }
}
