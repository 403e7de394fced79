//! # Session Gate and Role Gate
//!
//! ## Session Gate
//!
//! [`decide`] looks at a requested path and the credential found in the
//! session cookie and returns a [`GateDecision`]:
//!
//! | public path | credential | decision |
//! |-------------|------------|----------|
//! | `/login` | present | redirect to `/dashboard` |
//! | `/login` or `/` | absent | allow |
//! | `/` | present | allow |
//! | anything else | present | allow |
//! | anything else | absent | redirect to `/login` |
//!
//! Paths the gate never evaluates (see [`is_gated`]) are always allowed: API
//! routes, framework internals under `/_dioxus`, and any path containing a `.`
//! (static assets). An empty cookie value counts as absent.
//!
//! ## Role Gate
//!
//! [`check_role`] is the render-time guard for privileged pages. It is a UX
//! check only. The backend remains the authorization boundary.

use store::{Principal, Role, SessionContext};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";
pub const DASHBOARD_PATH: &str = "/dashboard";

const PUBLIC_PATHS: [&str; 2] = [LOGIN_PATH, HOME_PATH];

/// Prefixes (after the leading `/`) that bypass the gate entirely.
const EXCLUDED_PREFIXES: [&str; 2] = ["api", "_dioxus"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RedirectToLogin,
    RedirectToDashboard,
}

impl GateDecision {
    /// Redirect target, if any.
    pub fn location(&self) -> Option<&'static str> {
        match self {
            GateDecision::Allow => None,
            GateDecision::RedirectToLogin => Some(LOGIN_PATH),
            GateDecision::RedirectToDashboard => Some(DASHBOARD_PATH),
        }
    }
}

/// Whether the gate evaluates `path` at all.
pub fn is_gated(path: &str) -> bool {
    let rest = path.strip_prefix('/').unwrap_or(path);
    let excluded = EXCLUDED_PREFIXES.iter().any(|p| rest.starts_with(p)) || rest.contains('.');
    !excluded
}

pub fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

/// Decide what to do with a navigation to `path`.
pub fn decide(path: &str, credential: Option<&str>) -> GateDecision {
    if !is_gated(path) {
        return GateDecision::Allow;
    }

    let has_credential = credential.is_some_and(|c| !c.trim().is_empty());

    if !is_public(path) && !has_credential {
        GateDecision::RedirectToLogin
    } else if path == LOGIN_PATH && has_credential {
        GateDecision::RedirectToDashboard
    } else {
        GateDecision::Allow
    }
}

/// Role Gate refusal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleDenied {
    pub required: Role,
    /// `None` when nobody is signed in.
    pub actual: Option<Role>,
}

/// Grant access when the session's principal holds `required`.
pub fn check_role(session: &SessionContext, required: Role) -> Result<&Principal, RoleDenied> {
    match session.principal() {
        Some(principal) if principal.role == required => Ok(principal),
        other => Err(RoleDenied {
            required,
            actual: other.map(|p| p.role),
        }),
    }
}
