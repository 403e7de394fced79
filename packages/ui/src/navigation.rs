use dioxus::prelude::*;

use crate::icons::{FaBuilding, FaFileLines, FaGauge, FaShieldHalved, FaTicket};
use crate::Icon;

const NAVIGATION_CSS: Asset = asset!("/assets/styling/navigation.css");

fn item_class(active: &str, href: &str) -> &'static str {
    if active == href || active.starts_with(&format!("{href}/")) {
        "nav-item nav-item-active"
    } else {
        "nav-item"
    }
}

/// Side navigation for the admin platform. `active` is the current path.
#[component]
pub fn Navigation(active: String) -> Element {
    rsx! {
        document::Stylesheet { href: NAVIGATION_CSS }

        nav {
            class: "navigation",

            div { class: "nav-brand", "GRC Platform" }

            Link {
                class: item_class(&active, "/dashboard"),
                to: "/dashboard",
                Icon { icon: FaGauge, width: 14, height: 14 }
                span { "Dashboard" }
            }
            Link {
                class: item_class(&active, "/controls"),
                to: "/controls",
                Icon { icon: FaShieldHalved, width: 14, height: 14 }
                span { "Controls" }
            }
            Link {
                class: item_class(&active, "/tickets"),
                to: "/tickets",
                Icon { icon: FaTicket, width: 14, height: 14 }
                span { "Tickets" }
            }
            Link {
                class: item_class(&active, "/documents"),
                to: "/documents",
                Icon { icon: FaFileLines, width: 14, height: 14 }
                span { "Documents" }
            }
            Link {
                class: item_class(&active, "/vendors"),
                to: "/vendors",
                Icon { icon: FaBuilding, width: 14, height: 14 }
                span { "Vendors" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_paths_mark_section_active() {
        assert_eq!(item_class("/documents/d-1", "/documents"), "nav-item nav-item-active");
        assert_eq!(item_class("/documents", "/documents"), "nav-item nav-item-active");
        assert_eq!(item_class("/dashboard", "/documents"), "nav-item");
        assert_eq!(item_class("/documentsx", "/documents"), "nav-item");
    }
}
