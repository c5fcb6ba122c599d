//! Document list, card and empty state.

use api::{Document, User};
use chrono::DateTime;
use dioxus::prelude::*;

/// Render a backend timestamp as `dd/mm/yyyy`.
///
/// Accepts RFC 3339 strings and epoch milliseconds (some GraphQL date scalars
/// serialize that way). Anything else is shown as-is.
pub fn format_date(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%d/%m/%Y").to_string();
    }
    raw.parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .map(|parsed| parsed.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Grid of documents. The delete action is only offered where `viewer` may
/// manage the document.
#[component]
pub fn DocumentGrid(
    documents: Vec<Document>,
    #[props(!optional)] viewer: Option<User>,
    on_delete: EventHandler<Document>,
) -> Element {
    if documents.is_empty() {
        return rsx! {
            EmptyDocuments {}
        };
    }

    rsx! {
        div {
            class: "document-grid",
            for document in documents.iter() {
                DocumentCard {
                    key: "{document.id}",
                    can_delete: viewer.as_ref().is_some_and(|user| user.can_manage(document)),
                    document: document.clone(),
                    on_delete,
                }
            }
        }
    }
}

#[component]
pub fn DocumentCard(document: Document, can_delete: bool, on_delete: EventHandler<Document>) -> Element {
    let created = format_date(&document.created_at);
    let owner = document
        .user
        .as_ref()
        .map(|user| user.full_name.clone())
        .unwrap_or_default();
    let target = document.clone();

    rsx! {
        article {
            class: "document-card",
            header {
                class: "document-card-header",
                h3 { class: "document-title", "{document.title}" }
                if can_delete {
                    button {
                        class: "button button-danger button-small",
                        title: "Delete document",
                        onclick: move |_| on_delete.call(target.clone()),
                        "Delete"
                    }
                }
            }
            p { class: "document-description", "{document.description}" }
            footer {
                class: "document-card-footer",
                a {
                    class: "document-link",
                    href: "{document.file_url}",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    "Open file"
                }
                span {
                    class: "document-meta",
                    if !owner.is_empty() {
                        "{owner} · "
                    }
                    "{created}"
                }
            }
        }
    }
}

/// Shown when the signed-in user has no documents.
#[component]
pub fn EmptyDocuments() -> Element {
    rsx! {
        div {
            class: "empty-state",
            h3 { class: "empty-state-title", "No documents yet" }
            p { class: "empty-state-text", "Start by adding your first document." }
        }
    }
}
