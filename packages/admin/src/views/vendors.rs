use api::vendors::{VENDOR_CATEGORIES, VENDOR_STATUSES};
use api::{NewVendor, RiskTier};
use dioxus::prelude::*;
use ui::{make_client, use_session, RiskBadge};

use crate::Route;

#[component]
pub fn Vendors() -> Element {
    let state = use_session();
    let mut dialog_open = use_signal(|| false);

    let mut vendors = use_resource(move || async move {
        make_client()
            .vendors(&state().session)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Vendors unavailable: {}", e);
                Vec::new()
            })
    });

    rsx! {
        div {
            class: "page-body",
            div {
                class: "page-heading",
                div {
                    h1 { "Vendors" }
                    p { class: "page-subtitle", "Manage third-party vendors and their risks" }
                }
                button {
                    class: "btn",
                    onclick: move |_| dialog_open.set(true),
                    "Add Vendor"
                }
            }

            match vendors() {
                None => rsx! { p { class: "empty-state", "Loading..." } },
                Some(list) if list.is_empty() => rsx! {
                    p { class: "empty-state", "No vendors found." }
                },
                Some(list) => rsx! {
                    table {
                        class: "data-table",
                        thead {
                            tr {
                                th { "Name" }
                                th { "Category" }
                                th { "Risk Tier" }
                                th { "Status" }
                            }
                        }
                        tbody {
                            for vendor in list {
                                tr {
                                    key: "{vendor.id}",
                                    td {
                                        Link {
                                            to: Route::VendorDetail { id: vendor.id.clone() },
                                            "{vendor.name}"
                                        }
                                    }
                                    td { "{vendor.category}" }
                                    td { RiskBadge { tier: vendor.risk_tier.clone() } }
                                    td { "{vendor.status}" }
                                }
                            }
                        }
                    }
                },
            }

            if dialog_open() {
                NewVendorDialog {
                    on_close: move |_| dialog_open.set(false),
                    on_created: move |_| {
                        dialog_open.set(false);
                        vendors.restart();
                    },
                }
            }
        }
    }
}

#[component]
fn NewVendorDialog(on_close: EventHandler<()>, on_created: EventHandler<()>) -> Element {
    let state = use_session();
    let mut form = use_signal(NewVendor::default);
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let create = move |_| {
        spawn(async move {
            saving.set(true);
            error.set(None);
            match make_client().create_vendor(&state().session, &form()).await {
                Ok(()) => {
                    form.set(NewVendor::default());
                    on_created.call(());
                }
                Err(e) => {
                    tracing::warn!("Vendor creation failed: {}", e);
                    error.set(Some(e.to_string()));
                }
            }
            saving.set(false);
        });
    };

    rsx! {
        div {
            class: "dialog-overlay",
            div {
                class: "dialog",
                h2 { "Add Vendor" }
                p { class: "page-subtitle", "Register a new third-party vendor" }

                if let Some(message) = error() {
                    p { class: "form-error", "{message}" }
                }

                div {
                    class: "form-field",
                    label { r#for: "name", "Name" }
                    input {
                        id: "name",
                        value: "{form().name}",
                        oninput: move |e| form.write().name = e.value(),
                    }
                }
                div {
                    class: "form-field",
                    label { r#for: "desc", "Description" }
                    textarea {
                        id: "desc",
                        value: "{form().description}",
                        oninput: move |e| form.write().description = e.value(),
                    }
                }
                div {
                    class: "form-field",
                    label { "Category" }
                    select {
                        value: "{form().category}",
                        onchange: move |e| form.write().category = e.value(),
                        for category in VENDOR_CATEGORIES {
                            option { value: category, "{category}" }
                        }
                    }
                }
                div {
                    class: "form-field",
                    label { "Risk Tier" }
                    select {
                        value: "{form().risk_tier}",
                        onchange: move |e| form.write().risk_tier = e.value(),
                        for tier in RiskTier::ALL.iter().rev() {
                            option { value: tier.as_str(), "{tier.label()}" }
                        }
                    }
                }
                div {
                    class: "form-field",
                    label { "Status" }
                    select {
                        value: "{form().status}",
                        onchange: move |e| form.write().status = e.value(),
                        for (value, label) in VENDOR_STATUSES {
                            option { value: value, "{label}" }
                        }
                    }
                }

                div {
                    class: "form-actions",
                    button {
                        class: "btn btn-link",
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn",
                        disabled: saving(),
                        onclick: create,
                        "Create"
                    }
                }
            }
        }
    }
}
