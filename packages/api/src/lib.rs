//! # API crate — typed access to the GRC backend
//!
//! Everything the admin platform and the customer portal know about the
//! backend REST API lives here, together with the two pieces of routing logic
//! both frontends share.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`transport`] | [`HttpTransport`] seam, [`ReqwestTransport`] for production |
//! | [`client`] | [`GrcClient`]: bearer / API-key headers, status and decode classification |
//! | [`gate`] | Session Gate decision table and Role Gate check |
//! | [`auth`] | Password login |
//! | [`dashboard`] | Summary stats, overdue controls, recent activity, compliance by standard |
//! | [`controls`] | Control library, activated controls, activation |
//! | [`tickets`] | Internal ticket list, detail and comments; the portal's external ticket endpoints |
//! | [`documents`] | Document list/detail and two-step creation with retry |
//! | [`vendors`] | Vendor list/detail/create |
//!
//! ## Errors
//!
//! Every endpoint returns `Result<_, ApiError>`. Views decide how to degrade;
//! the client never substitutes defaults on its own.

pub mod auth;
pub mod client;
pub mod controls;
pub mod dashboard;
pub mod documents;
pub mod error;
pub mod gate;
pub mod tickets;
pub mod transport;
pub mod vendors;

#[cfg(test)]
mod recording;
#[cfg(test)]
pub(crate) use recording::RecordingTransport;

pub use client::{Auth, GrcClient};
pub use controls::{ActivateControlRequest, ActivatedControl, LibraryControl};
pub use dashboard::{AuditEvent, DashboardStats, OverdueControl, StandardProgress};
pub use documents::{
    Document, DocumentCategory, DocumentCreation, DocumentDetail, DocumentDraft, DocumentVersion,
};
pub use error::ApiError;
pub use gate::{GateDecision, RoleDenied};
pub use tickets::{
    ExternalTicketRequest, NewComment, PageWindow, Ticket, TicketComment, TicketDetail, TicketStatus,
};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, ReqwestTransport};
pub use vendors::{NewVendor, RiskTier, Vendor};

pub use store::{ClientConfig, Credential, Principal, Role, SessionContext};
