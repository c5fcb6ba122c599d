//! Data models exchanged with the backend.

mod document;
mod user;

pub use document::{
    CreateDocumentInput, Document, DocumentFile, UpdateDocumentInput, UserSummary,
};
pub use user::{AuthResponse, Credentials, Registration, Role, User};
