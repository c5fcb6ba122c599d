//! Shared Dioxus UI for Docdesk.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`session`] | [`SessionProvider`] context and the [`SessionHandle`] views call |
//! | [`guard`] | [`ProtectedRoute`] gating views on session and role |
//! | [`toast`] | Transient notifications |
//! | [`documents`] | Document grid, card and empty state |
//! | [`routes`] | Paths shared with the app's router |
//! | [`storage`] | Platform client storage behind the session |
//! | [`views`] | Modal overlay and loading screen |

pub mod documents;
pub mod guard;
pub mod routes;
pub mod session;
pub mod storage;
pub mod toast;
pub mod views;

mod create_document_dialog;
mod header;

pub use create_document_dialog::CreateDocumentDialog;
pub use documents::{format_date, DocumentCard, DocumentGrid, EmptyDocuments};
pub use guard::{evaluate, GuardOutcome, ProtectedRoute};
pub use header::{AppHeader, LogoutButton};
pub use session::{use_session, AppSession, SessionHandle, SessionProvider};
pub use storage::{make_storage, ClientStore};
pub use toast::{use_toaster, Toast, ToastLevel, ToastProvider, Toaster, Toasts};
pub use views::{LoadingScreen, ModalOverlay};
