use dioxus::prelude::*;
use ui::{make_client, use_session, Markdown};

use crate::Route;

#[component]
pub fn DocumentDetail(id: String) -> Element {
    let state = use_session();
    let is_admin = state()
        .session
        .principal()
        .is_some_and(|p| p.is_admin());

    let mut detail = use_resource({
        let id = id.clone();
        use_reactive!(|(id,)| async move {
            make_client()
                .document(&state().session, &id)
                .await
                .map_err(|e| {
                    tracing::warn!("Document {} unavailable: {}", id, e);
                    e
                })
                .ok()
        })
    });

    let mut body = use_signal(String::new);
    let mut change = use_signal(String::new);
    let mut version_error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let add_version = {
        let id = id.clone();
        move |e: FormEvent| {
            e.prevent_default();
            let id = id.clone();
            spawn(async move {
                saving.set(true);
                version_error.set(None);
                match make_client()
                    .add_version(&state().session, &id, &body(), &change())
                    .await
                {
                    Ok(()) => {
                        body.set(String::new());
                        change.set(String::new());
                        detail.restart();
                    }
                    Err(e) => {
                        tracing::warn!("Adding version to {} failed: {}", id, e);
                        version_error.set(Some(e.to_string()));
                    }
                }
                saving.set(false);
            });
        }
    };

    let Some(loaded) = detail() else {
        return rsx! {
            div { class: "page-body", p { class: "empty-state", "Loading..." } }
        };
    };
    let Some(loaded) = loaded else {
        return rsx! {
            div {
                class: "page-body",
                p { class: "empty-state", "Document not found" }
                Link { class: "btn btn-link", to: Route::Documents {}, "Back to documents" }
            }
        };
    };

    let document = loaded.document.clone();
    let latest = loaded.latest_version().cloned();
    let mut versions = loaded.versions.clone();
    versions.sort_by(|a, b| b.version_number.cmp(&a.version_number));

    rsx! {
        div {
            class: "page-body",
            Link { class: "btn btn-link", to: Route::Documents {}, "Back to documents" }

            div {
                class: "page-heading",
                h1 { "{document.title}" }
                span { class: "badge badge-gray", "{document.category}" }
            }

            section {
                class: "document-content",
                match latest {
                    Some(version) => rsx! {
                        p { class: "page-subtitle", "Version {version.version_number}" }
                        Markdown { content: version.body_content }
                    },
                    None => rsx! {
                        p { class: "notice", "This document has no content yet." }
                    },
                }
            }

            section {
                class: "document-versions",
                h2 { "Version History" }
                if versions.is_empty() {
                    p { class: "empty-state", "No versions yet" }
                } else {
                    table {
                        class: "data-table",
                        thead {
                            tr {
                                th { "Version" }
                                th { "Change" }
                                th { "Status" }
                                th { "Created" }
                            }
                        }
                        tbody {
                            for version in versions {
                                tr {
                                    key: "{version.id}",
                                    td { "v{version.version_number}" }
                                    td { {version.change_description.clone().unwrap_or_default()} }
                                    td { {version.status.clone().unwrap_or_else(|| "draft".to_string())} }
                                    td { {version.created_at.clone().unwrap_or_default()} }
                                }
                            }
                        }
                    }
                }
            }

            if is_admin {
                section {
                    class: "document-new-version",
                    h2 { "New Version" }
                    if let Some(message) = version_error() {
                        p { class: "form-error", "{message}" }
                    }
                    form {
                        onsubmit: add_version,
                        div {
                            class: "form-field",
                            label { r#for: "version-body", "Content (Markdown)" }
                            textarea {
                                id: "version-body",
                                rows: 12,
                                value: "{body}",
                                oninput: move |e| body.set(e.value()),
                            }
                        }
                        div {
                            class: "form-field",
                            label { r#for: "version-change", "Change description" }
                            input {
                                id: "version-change",
                                value: "{change}",
                                oninput: move |e| change.set(e.value()),
                            }
                        }
                        button {
                            class: "btn",
                            r#type: "submit",
                            disabled: saving(),
                            if saving() { "Saving..." } else { "Create Version" }
                        }
                    }
                }
            }
        }
    }
}
