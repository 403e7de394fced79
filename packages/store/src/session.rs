//! # Session model
//!
//! A session is passed around explicitly as a [`SessionContext`] value rather
//! than looked up from ambient storage. It is either
//! [`SessionContext::Authenticated`], carrying the bearer [`Credential`] and the
//! [`Principal`] it belongs to, or [`SessionContext::Unauthenticated`].
//!
//! There is no way to hold a principal without a credential: the authenticated
//! variant requires both, and [`SessionContext::new`] falls back to
//! unauthenticated when either is missing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque bearer token identifying an authenticated session.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw token. Blank tokens are treated as absent.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(..)")
    }
}

/// Role carried by a principal. Unrecognised roles deserialize to `Unknown`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Unknown => "unknown",
        }
    }
}

/// The user record associated with a credential.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub onboarding_completed: bool,
}

impl Principal {
    /// Name for display, falling back to email and then id.
    pub fn display_name(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else if !self.email.is_empty() {
            &self.email
        } else {
            &self.id
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum SessionContext {
    Authenticated {
        credential: Credential,
        principal: Principal,
    },
    #[default]
    Unauthenticated,
}

impl SessionContext {
    /// Build a session from parts that may each be missing.
    pub fn new(credential: Option<Credential>, principal: Option<Principal>) -> Self {
        match (credential, principal) {
            (Some(credential), Some(principal)) => SessionContext::Authenticated {
                credential,
                principal,
            },
            _ => SessionContext::Unauthenticated,
        }
    }

    pub fn credential(&self) -> Option<&Credential> {
        match self {
            SessionContext::Authenticated { credential, .. } => Some(credential),
            SessionContext::Unauthenticated => None,
        }
    }

    pub fn principal(&self) -> Option<&Principal> {
        match self {
            SessionContext::Authenticated { principal, .. } => Some(principal),
            SessionContext::Unauthenticated => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.principal().map(|p| p.role)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionContext::Authenticated { .. })
    }
}
