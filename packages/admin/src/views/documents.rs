use api::Document;
use dioxus::prelude::*;
use ui::{make_client, use_session};

use crate::Route;

fn status_badge(document: &Document) -> (&'static str, &'static str) {
    if document.published_version_id.is_some() {
        ("badge badge-green", "Published")
    } else {
        ("badge badge-yellow", "Draft")
    }
}

#[component]
pub fn Documents() -> Element {
    let state = use_session();
    let is_admin = state()
        .session
        .principal()
        .is_some_and(|p| p.is_admin());

    let documents = use_resource(move || async move {
        make_client()
            .documents(&state().session)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Documents unavailable: {}", e);
                Vec::new()
            })
    });

    rsx! {
        div {
            class: "page-body",
            div {
                class: "page-heading",
                div {
                    h1 { "Documents" }
                    p {
                        class: "page-subtitle",
                        "Manage organizational policies, procedures, and compliance documentation"
                    }
                }
                if is_admin {
                    Link { class: "btn", to: Route::NewDocument {}, "New Document" }
                }
            }

            match documents() {
                None => rsx! { p { class: "empty-state", "Loading..." } },
                Some(list) if list.is_empty() => rsx! {
                    p { class: "empty-state", "No documents yet." }
                },
                Some(list) => rsx! {
                    table {
                        class: "data-table",
                        thead {
                            tr {
                                th { "Title" }
                                th { "Category" }
                                th { "Status" }
                                th { "Created" }
                            }
                        }
                        tbody {
                            for document in list {
                                tr {
                                    key: "{document.id}",
                                    td {
                                        Link {
                                            to: Route::DocumentDetail { id: document.id.clone() },
                                            "{document.title}"
                                        }
                                    }
                                    td { "{document.category}" }
                                    td {
                                        span { class: status_badge(&document).0, {status_badge(&document).1} }
                                    }
                                    td { {document.created_at.clone().unwrap_or_default()} }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
