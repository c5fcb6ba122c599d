//! # Data-access layer
//!
//! [`DocumentBackend`] is the one contract every protocol binding implements.
//! [`Backend`] picks an implementation at configuration time:
//!
//! | Variant | Module | Transport |
//! |---------|--------|-----------|
//! | [`Backend::Rest`] | [`rest`] | JSON + multipart over `reqwest` |
//! | [`Backend::Graphql`] | [`graphql`] | typed operations POSTed to one endpoint |
//! | [`Backend::Memory`] | [`memory`] | in-process fake, no network |
//!
//! Every implementation attaches the current [`BearerToken`] to outbound calls
//! and reports a rejected token as [`ApiError::Unauthenticated`]. Deciding what
//! to do about it is the session manager's job, not the transport's.

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::{BackendKind, ClientConfig};
use crate::error::ApiError;
use crate::models::{
    AuthResponse, CreateDocumentInput, Credentials, Document, Registration, UpdateDocumentInput,
    User,
};

pub mod graphql;
pub mod memory;
pub mod rest;

pub use graphql::GraphqlBackend;
pub use memory::MemoryBackend;
pub use rest::RestBackend;

/// Shared handle to the bearer token attached to outbound requests.
///
/// The session manager writes it; backends read it on every call.
#[derive(Clone, Default)]
pub struct BearerToken(Arc<RwLock<Option<String>>>);

impl BearerToken {
    pub fn get(&self) -> Option<String> {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    pub fn clear(&self) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn is_set(&self) -> bool {
        self.0.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = if self.is_set() { "set" } else { "unset" };
        f.debug_tuple("BearerToken").field(&state).finish()
    }
}

/// Async interface to a document backend.
pub trait DocumentBackend {
    /// Token attached to every call made through this backend.
    fn token(&self) -> &BearerToken;

    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<AuthResponse, ApiError>>;
    fn register(
        &self,
        registration: &Registration,
    ) -> impl Future<Output = Result<AuthResponse, ApiError>>;
    fn current_user(&self) -> impl Future<Output = Result<User, ApiError>>;

    /// Every document the caller may see.
    fn documents(&self) -> impl Future<Output = Result<Vec<Document>, ApiError>>;
    /// Documents owned by the caller.
    fn my_documents(&self) -> impl Future<Output = Result<Vec<Document>, ApiError>>;
    fn document(&self, id: &str) -> impl Future<Output = Result<Document, ApiError>>;
    fn create_document(
        &self,
        input: &CreateDocumentInput,
    ) -> impl Future<Output = Result<Document, ApiError>>;
    fn update_document(
        &self,
        input: &UpdateDocumentInput,
    ) -> impl Future<Output = Result<Document, ApiError>>;
    fn delete_document(&self, id: &str) -> impl Future<Output = Result<(), ApiError>>;
}

/// Reject documents whose embedded owner disagrees with `userId`.
pub(crate) fn check_owner(document: Document) -> Result<Document, ApiError> {
    if document.owner_consistent() {
        Ok(document)
    } else {
        Err(ApiError::Decode(format!(
            "document {} embeds a user other than its owner {}",
            document.id, document.user_id
        )))
    }
}

pub(crate) fn check_owners(documents: Vec<Document>) -> Result<Vec<Document>, ApiError> {
    documents.into_iter().map(check_owner).collect()
}

/// The configured backend.
#[derive(Clone, Debug)]
pub enum Backend {
    Rest(RestBackend),
    Graphql(GraphqlBackend),
    Memory(MemoryBackend),
}

impl Backend {
    pub fn from_config(config: &ClientConfig) -> Self {
        match config.backend {
            BackendKind::Rest => {
                tracing::info!("Using REST backend at {}", config.base_url());
                Backend::Rest(RestBackend::new(config.base_url()))
            }
            BackendKind::Graphql => {
                let backend = GraphqlBackend::new(config.graphql_endpoint());
                tracing::info!("Using GraphQL backend at {}", backend.endpoint());
                Backend::Graphql(backend)
            }
            BackendKind::Memory => {
                tracing::info!("Using in-memory backend");
                Backend::Memory(MemoryBackend::new())
            }
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::Rest(_) => BackendKind::Rest,
            Backend::Graphql(_) => BackendKind::Graphql,
            Backend::Memory(_) => BackendKind::Memory,
        }
    }
}

impl DocumentBackend for Backend {
    fn token(&self) -> &BearerToken {
        match self {
            Backend::Rest(b) => b.token(),
            Backend::Graphql(b) => b.token(),
            Backend::Memory(b) => b.token(),
        }
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        match self {
            Backend::Rest(b) => b.login(credentials).await,
            Backend::Graphql(b) => b.login(credentials).await,
            Backend::Memory(b) => b.login(credentials).await,
        }
    }

    async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        match self {
            Backend::Rest(b) => b.register(registration).await,
            Backend::Graphql(b) => b.register(registration).await,
            Backend::Memory(b) => b.register(registration).await,
        }
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        match self {
            Backend::Rest(b) => b.current_user().await,
            Backend::Graphql(b) => b.current_user().await,
            Backend::Memory(b) => b.current_user().await,
        }
    }

    async fn documents(&self) -> Result<Vec<Document>, ApiError> {
        match self {
            Backend::Rest(b) => b.documents().await,
            Backend::Graphql(b) => b.documents().await,
            Backend::Memory(b) => b.documents().await,
        }
    }

    async fn my_documents(&self) -> Result<Vec<Document>, ApiError> {
        match self {
            Backend::Rest(b) => b.my_documents().await,
            Backend::Graphql(b) => b.my_documents().await,
            Backend::Memory(b) => b.my_documents().await,
        }
    }

    async fn document(&self, id: &str) -> Result<Document, ApiError> {
        match self {
            Backend::Rest(b) => b.document(id).await,
            Backend::Graphql(b) => b.document(id).await,
            Backend::Memory(b) => b.document(id).await,
        }
    }

    async fn create_document(&self, input: &CreateDocumentInput) -> Result<Document, ApiError> {
        match self {
            Backend::Rest(b) => b.create_document(input).await,
            Backend::Graphql(b) => b.create_document(input).await,
            Backend::Memory(b) => b.create_document(input).await,
        }
    }

    async fn update_document(&self, input: &UpdateDocumentInput) -> Result<Document, ApiError> {
        match self {
            Backend::Rest(b) => b.update_document(input).await,
            Backend::Graphql(b) => b.update_document(input).await,
            Backend::Memory(b) => b.update_document(input).await,
        }
    }

    async fn delete_document(&self, id: &str) -> Result<(), ApiError> {
        match self {
            Backend::Rest(b) => b.delete_document(id).await,
            Backend::Graphql(b) => b.delete_document(id).await,
            Backend::Memory(b) => b.delete_document(id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_shared_between_clones() {
        let token = BearerToken::default();
        let reader = token.clone();
        assert!(reader.get().is_none());

        token.set("abc");
        assert_eq!(reader.get().as_deref(), Some("abc"));

        reader.clear();
        assert!(!token.is_set());
    }

    #[test]
    fn test_bearer_token_debug_hides_value() {
        let token = BearerToken::default();
        token.set("super-secret");
        let printed = format!("{token:?}");
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("set"));
    }

    #[test]
    fn test_backend_from_config() {
        let config = ClientConfig::new("http://localhost:3000/", BackendKind::Rest);
        assert_eq!(Backend::from_config(&config).kind(), BackendKind::Rest);

        let config = config.with_backend(BackendKind::Graphql);
        match Backend::from_config(&config) {
            Backend::Graphql(backend) => {
                assert_eq!(backend.endpoint(), "http://localhost:3000/graphql")
            }
            other => panic!("expected GraphQL backend, got {:?}", other.kind()),
        }

        let config = config.with_backend(BackendKind::Memory);
        assert_eq!(Backend::from_config(&config).kind(), BackendKind::Memory);
    }

    #[test]
    fn test_check_owner() {
        let json = r#"{
            "id": "d1", "title": "T", "description": "D", "fileUrl": "https://x/y.pdf",
            "userId": "u1", "createdAt": "now",
            "user": {"id": "u2", "email": "b@c.com", "fullName": "B C"}
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert!(matches!(check_owner(doc), Err(ApiError::Decode(_))));
    }
}
