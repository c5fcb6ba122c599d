use api::{validation, CreateDocumentInput, Document};
use dioxus::prelude::*;

use crate::session::use_session;
use crate::toast::use_toaster;
use crate::views::ModalOverlay;

/// Modal form for adding a document by link.
#[component]
pub fn CreateDocumentDialog(on_created: EventHandler<Document>, on_close: EventHandler<()>) -> Element {
    let session = use_session();
    let toaster = use_toaster();
    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut file_url = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let session = session.clone();
        async move {
            error.set(None);
            let input = CreateDocumentInput::link(
                title().trim(),
                description().trim(),
                file_url().trim(),
            );
            if let Err(e) = validation::validate_new_document(&input) {
                error.set(Some(e.user_message()));
                return;
            }

            saving.set(true);
            match session.create_document(&input).await {
                Ok(document) => {
                    toaster.success("Document created");
                    saving.set(false);
                    on_created.call(document);
                    on_close.call(());
                }
                Err(e) => {
                    tracing::error!("Failed to create document: {e}");
                    saving.set(false);
                    if !e.is_unauthenticated() {
                        toaster.error(e.user_message());
                    }
                }
            }
        }
    };

    rsx! {
        ModalOverlay {
            title: "New document",
            on_close,
            form {
                class: "form",
                onsubmit: handle_submit,

                if let Some(err) = error() {
                    div { class: "form-error", "{err}" }
                }

                div {
                    class: "form-group",
                    label { r#for: "document-title", "Title" }
                    input {
                        id: "document-title",
                        r#type: "text",
                        placeholder: "Quarterly report",
                        value: title(),
                        oninput: move |evt| title.set(evt.value()),
                    }
                }

                div {
                    class: "form-group",
                    label { r#for: "document-description", "Description" }
                    textarea {
                        id: "document-description",
                        rows: "3",
                        placeholder: "What is this document about?",
                        value: description(),
                        oninput: move |evt| description.set(evt.value()),
                    }
                }

                div {
                    class: "form-group",
                    label { r#for: "document-file-url", "File URL" }
                    input {
                        id: "document-file-url",
                        r#type: "url",
                        placeholder: "https://example.com/report.pdf",
                        value: file_url(),
                        oninput: move |evt| file_url.set(evt.value()),
                    }
                }

                div {
                    class: "form-actions",
                    button {
                        r#type: "button",
                        class: "button button-outline",
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    button {
                        r#type: "submit",
                        class: "button button-primary",
                        disabled: saving(),
                        if saving() { "Saving..." } else { "Create" }
                    }
                }
            }
        }
    }
}
