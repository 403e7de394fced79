use api::{RiskTier, TicketStatus};
use dioxus::prelude::*;

fn risk_class(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::Critical => "badge badge-red",
        RiskTier::High => "badge badge-orange",
        RiskTier::Medium => "badge badge-yellow",
        RiskTier::Low => "badge badge-green",
    }
}

#[component]
pub fn RiskBadge(tier: String) -> Element {
    let tier = RiskTier::parse(&tier);
    rsx! {
        span { class: risk_class(tier), "{tier.label()}" }
    }
}

#[component]
pub fn TicketStatusBadge(status: String) -> Element {
    let class = TicketStatus::parse(&status).css_class();
    rsx! {
        span { class: class, "{status}" }
    }
}
