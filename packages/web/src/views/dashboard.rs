//! Document dashboard: the signed-in user's documents.

use api::{ApiError, Document};
use dioxus::prelude::*;
use ui::{
    use_session, use_toaster, AppHeader, CreateDocumentDialog, DocumentGrid, LoadingScreen,
    ProtectedRoute,
};

#[component]
pub fn Dashboard() -> Element {
    rsx! {
        ProtectedRoute {
            DashboardContent {}
        }
    }
}

#[component]
fn DashboardContent() -> Element {
    let session = use_session();
    let toaster = use_toaster();
    let mut documents = use_signal(Vec::<Document>::new);
    let mut loading = use_signal(|| true);
    let mut show_create = use_signal(|| false);

    // Load on mount. On failure the previous list stays on screen.
    let loader = {
        let session = session.clone();
        use_resource(move || {
            let session = session.clone();
            async move {
                loading.set(true);
                match session.my_documents().await {
                    Ok(list) => documents.set(list),
                    Err(ApiError::Unauthenticated) => {}
                    Err(e) => {
                        tracing::error!("Failed to load documents: {e}");
                        toaster.error(e.user_message());
                    }
                }
                loading.set(false);
            }
        })
    };

    let handle_delete = {
        let session = session.clone();
        move |document: Document| {
            let session = session.clone();
            spawn(async move {
                match session.delete_document(&document).await {
                    Ok(()) => {
                        documents.write().retain(|d| d.id != document.id);
                        toaster.success("Document deleted");
                    }
                    Err(ApiError::Unauthenticated) => {}
                    Err(e) => {
                        tracing::error!("Failed to delete document {}: {e}", document.id);
                        toaster.error(e.user_message());
                    }
                }
            });
        }
    };

    let handle_created = move |_: Document| {
        let mut loader = loader;
        loader.restart();
    };

    let viewer = session.user();
    let count = documents.read().len();

    rsx! {
        AppHeader { title: "My documents" }
        main {
            class: "page",
            div {
                class: "toolbar",
                span { class: "muted", "{count} document(s)" }
                button {
                    class: "button button-primary",
                    onclick: move |_| show_create.set(true),
                    "New document"
                }
            }

            if loading() && count == 0 {
                LoadingScreen { message: "Loading documents..." }
            } else {
                DocumentGrid {
                    documents: documents(),
                    viewer,
                    on_delete: handle_delete,
                }
            }
        }

        if show_create() {
            CreateDocumentDialog {
                on_created: handle_created,
                on_close: move |_| show_create.set(false),
            }
        }
    }
}
