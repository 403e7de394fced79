use dioxus::prelude::*;

use crate::icons::FaRightFromBracket;
use crate::{use_session, Icon, LogoutButton};

/// Page header with the signed-in principal and a sign-out button.
#[component]
pub fn Header(title: String) -> Element {
    let state = use_session();
    let name = state()
        .session
        .principal()
        .map(|p| p.display_name().to_string());

    rsx! {
        header {
            class: "page-header",
            h1 { class: "page-title", "{title}" }
            div {
                class: "page-header-actions",
                if let Some(name) = name {
                    span { class: "page-header-user", "Welcome, {name}" }
                }
                span {
                    class: "page-header-logout",
                    Icon { icon: FaRightFromBracket, width: 12, height: 12 }
                    LogoutButton { label: "Logout", class: "btn btn-link" }
                }
            }
        }
    }
}
