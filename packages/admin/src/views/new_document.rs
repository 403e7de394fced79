//! Document creation, admins only.

use api::{ApiError, Document, DocumentCategory, DocumentCreation, DocumentDraft, Role};
use dioxus::prelude::*;
use ui::{make_client, use_session, RoleGate};

use crate::Route;

fn creation_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Validation(message) => message.clone(),
        other => format!("Failed to create document: {other}"),
    }
}

#[component]
pub fn NewDocument() -> Element {
    rsx! {
        RoleGate {
            required: Role::Admin,
            fallback: "/documents",
            NewDocumentForm {}
        }
    }
}

#[component]
fn NewDocumentForm() -> Element {
    let state = use_session();
    let nav = use_navigator();
    let mut draft = use_signal(DocumentDraft::default);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);
    // Set when the document exists but its first version does not
    let mut incomplete = use_signal(|| None::<Document>);

    let onsubmit = move |e: FormEvent| {
        e.prevent_default();
        spawn(async move {
            submitting.set(true);
            error.set(None);

            let session = state().session;
            match make_client().create_document(&session, &draft()).await {
                Ok(DocumentCreation::Complete(document)) => {
                    nav.push(Route::DocumentDetail { id: document.id });
                }
                Ok(DocumentCreation::Incomplete { document, error: cause }) => {
                    error.set(Some(format!(
                        "The document was created but its content could not be saved: {cause}"
                    )));
                    incomplete.set(Some(document));
                }
                Err(e) => {
                    tracing::warn!("Document creation failed: {}", e);
                    error.set(Some(creation_error_message(&e)));
                }
            }

            submitting.set(false);
        });
    };

    let retry = move |_| {
        let Some(document) = incomplete() else {
            return;
        };
        spawn(async move {
            submitting.set(true);
            let session = state().session;
            match make_client()
                .create_initial_version(&session, &document.id, &draft())
                .await
            {
                Ok(()) => {
                    incomplete.set(None);
                    nav.push(Route::DocumentDetail { id: document.id });
                }
                Err(e) => {
                    tracing::warn!("Retry for document {} failed: {}", document.id, e);
                    error.set(Some(creation_error_message(&e)));
                }
            }
            submitting.set(false);
        });
    };

    rsx! {
        div {
            class: "page-body",
            div {
                class: "page-heading",
                h1 { "Create New Document" }
                button {
                    class: "btn btn-link",
                    onclick: move |_| {
                        nav.push(Route::Documents {});
                    },
                    "Back to documents"
                }
            }

            if let Some(message) = error() {
                div { class: "form-error", "{message}" }
            }

            if let Some(document) = incomplete() {
                div {
                    class: "notice",
                    p { "\"{document.title}\" has no content yet." }
                    button {
                        class: "btn",
                        disabled: submitting(),
                        onclick: retry,
                        "Retry saving content"
                    }
                    Link {
                        class: "btn btn-link",
                        to: Route::DocumentDetail { id: document.id.clone() },
                        "Open document"
                    }
                }
            }

            form {
                class: "document-form",
                onsubmit: onsubmit,

                div {
                    class: "form-field",
                    label { r#for: "title", "Title" }
                    input {
                        id: "title",
                        placeholder: "e.g., Information Security Policy",
                        value: "{draft().title}",
                        oninput: move |e| draft.write().title = e.value(),
                    }
                }

                div {
                    class: "form-field",
                    label { r#for: "category", "Category" }
                    select {
                        id: "category",
                        value: "{draft().category.as_str()}",
                        onchange: move |e| draft.write().category = DocumentCategory::parse(&e.value()),
                        for category in DocumentCategory::ALL {
                            option { value: category.as_str(), "{category.as_str()}" }
                        }
                    }
                }

                div {
                    class: "form-field",
                    label { r#for: "body", "Content (Markdown)" }
                    textarea {
                        id: "body",
                        rows: 16,
                        placeholder: "Enter the document content here...",
                        value: "{draft().body_content}",
                        oninput: move |e| draft.write().body_content = e.value(),
                    }
                }

                div {
                    class: "form-field",
                    label { r#for: "change", "Change description" }
                    input {
                        id: "change",
                        placeholder: "Initial version",
                        value: "{draft().change_description}",
                        oninput: move |e| draft.write().change_description = e.value(),
                    }
                }

                div {
                    class: "form-actions",
                    button {
                        class: "btn btn-link",
                        r#type: "button",
                        onclick: move |_| {
                            nav.push(Route::Documents {});
                        },
                        "Cancel"
                    }
                    button {
                        class: "btn",
                        r#type: "submit",
                        disabled: submitting() || incomplete().is_some(),
                        if submitting() { "Creating..." } else { "Create Document" }
                    }
                }
            }
        }
    }
}
