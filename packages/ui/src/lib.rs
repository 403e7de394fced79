//! This crate contains all shared UI for the admin platform and the customer portal.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod client;
pub use client::{make_client, make_kv, Client};

mod session;
pub use session::{sign_in, sign_out, use_session, LogoutButton, SessionProvider, SessionState};

mod role_gate;
pub use role_gate::RoleGate;

mod navigation;
pub use navigation::Navigation;

mod header;
pub use header::Header;

mod stat_card;
pub use stat_card::StatCard;

mod badge;
pub use badge::{RiskBadge, TicketStatusBadge};

mod markdown;
pub use markdown::{render_markdown, Markdown};

pub const UI_CSS: Asset = asset!("/assets/ui.css");
