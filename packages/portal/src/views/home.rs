//! Customer reference entry.

use dioxus::prelude::*;
use store::CustomerRefStore;
use ui::make_kv;

use crate::Route;

#[component]
pub fn Home() -> Element {
    let nav = use_navigator();
    let mut customer_ref = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);

    // Skip the form for returning customers
    use_effect(move || {
        if CustomerRefStore::new(make_kv()).load().is_some() {
            nav.push(Route::Tickets {});
        }
    });

    let onsubmit = move |e: FormEvent| {
        e.prevent_default();
        match CustomerRefStore::new(make_kv()).save(&customer_ref()) {
            Ok(Some(saved)) => {
                tracing::info!("Customer reference {} stored", saved);
                nav.push(Route::Tickets {});
            }
            Ok(None) => error.set(Some("Please enter your customer reference".to_string())),
            Err(e) => {
                tracing::error!("Failed to store customer reference: {}", e);
                error.set(Some("Could not save your customer reference".to_string()));
            }
        }
    };

    rsx! {
        div {
            class: "portal-entry",
            div {
                class: "portal-card",
                h2 { class: "portal-title", "Customer Portal" }
                p {
                    class: "page-subtitle",
                    "Enter your customer reference to access your support tickets"
                }

                form {
                    onsubmit: onsubmit,

                    if let Some(message) = error() {
                        p { class: "form-error", "{message}" }
                    }

                    div {
                        class: "form-field",
                        label { r#for: "customerRef", "Customer Reference" }
                        input {
                            id: "customerRef",
                            name: "customerRef",
                            r#type: "text",
                            placeholder: "Enter your customer reference",
                            value: "{customer_ref}",
                            oninput: move |e| customer_ref.set(e.value()),
                        }
                    }

                    button { class: "btn portal-submit", r#type: "submit", "Access Portal" }
                }
            }
        }
    }
}
