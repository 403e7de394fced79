use dioxus::prelude::*;

/// A labelled number. The value sits in the `dd` right after the label's `dt`.
#[component]
pub fn StatCard(label: String, value: u64) -> Element {
    rsx! {
        dl {
            class: "stat-card",
            dt { class: "stat-label", "{label}" }
            dd { class: "stat-value", "{value}" }
        }
    }
}
