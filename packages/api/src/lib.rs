//! # API crate — data access and session lifecycle for Docdesk
//!
//! Everything the views need to talk to the document backend lives here. The
//! crate has no UI dependency, so its behaviour is tested natively.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`backend`] | [`DocumentBackend`] contract with REST, GraphQL and in-memory bindings, selected through [`Backend`] |
//! | [`config`] | [`ClientConfig`]: backend choice, API URL, password policy (TOML or build-time env) |
//! | [`error`] | [`ApiError`] taxonomy shared by every layer |
//! | [`models`] | `User`, `Document` and request/response payloads |
//! | [`session`] | [`SessionManager`]: login, register, restore, logout, and 401 teardown |
//! | [`validation`] | Client-side form checks run before anything is sent |

pub mod backend;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod validation;

pub use backend::{Backend, BearerToken, DocumentBackend, GraphqlBackend, MemoryBackend, RestBackend};
pub use config::{BackendKind, ClientConfig};
pub use error::ApiError;
pub use models::{
    AuthResponse, CreateDocumentInput, Credentials, Document, DocumentFile, Registration, Role,
    UpdateDocumentInput, User, UserSummary,
};
pub use session::{Session, SessionManager, SessionState, ACCESS_TOKEN_KEY, USER_KEY};
