use dioxus::prelude::*;
use ui::{make_client, use_session, RiskBadge};

use crate::Route;

#[component]
pub fn VendorDetail(id: String) -> Element {
    let state = use_session();

    let vendor = use_resource(use_reactive!(|(id,)| async move {
        make_client()
            .vendor(&state().session, &id)
            .await
            .map_err(|e| {
                tracing::warn!("Vendor {} unavailable: {}", id, e);
                e
            })
            .ok()
    }));

    rsx! {
        div {
            class: "page-body",
            Link { class: "btn btn-link", to: Route::Vendors {}, "Back to vendors" }

            match vendor() {
                None => rsx! { p { class: "empty-state", "Loading..." } },
                Some(None) => rsx! { p { class: "empty-state", "Vendor not found" } },
                Some(Some(vendor)) => rsx! {
                    div {
                        class: "page-heading",
                        div {
                            h1 { "{vendor.name}" }
                            p { class: "page-subtitle", "{vendor.category}" }
                        }
                        RiskBadge { tier: vendor.risk_tier.clone() }
                    }

                    section {
                        class: "vendor-info",
                        h2 { "Vendor Information" }
                        dl {
                            class: "detail-list",
                            dt { "Status" }
                            dd { "{vendor.status}" }
                            dt { "Description" }
                            dd { {vendor.description.clone().unwrap_or_else(|| "-".to_string())} }
                            dt { "Contact" }
                            dd { {vendor.contact_name.clone().unwrap_or_else(|| "-".to_string())} }
                            dt { "Email" }
                            dd { {vendor.contact_email.clone().unwrap_or_else(|| "-".to_string())} }
                            dt { "Website" }
                            dd { {vendor.website.clone().unwrap_or_else(|| "-".to_string())} }
                        }
                        if vendor.risk().is_severe() {
                            p { class: "notice", "This vendor is rated {vendor.risk().label()} risk and needs regular assessment." }
                        }
                    }
                },
            }
        }
    }
}
