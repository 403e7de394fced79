//! # Client configuration — `grc.toml`
//!
//! Settings every frontend needs before it can talk to the backend:
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8080/api/v1"
//!
//! [portal]
//! api_key = "test-api-key"
//!
//! [session]
//! cookie_name = "token"
//! ```
//!
//! Missing keys keep their defaults. WASM builds cannot read files at
//! runtime, so the workspace `grc.toml` is embedded when this crate compiles and
//! `GRC_API_URL`, `GRC_PORTAL_API_KEY` and `GRC_SESSION_COOKIE` present at
//! compile time override it. The browser and the server hosting it therefore
//! always agree on the session cookie name.

use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";
const DEFAULT_PORTAL_API_KEY: &str = "test-api-key";
const DEFAULT_COOKIE_NAME: &str = "token";

/// The workspace `grc.toml`, as it was when this crate compiled.
const COMPILED_TOML: &str = include_str!("../../../grc.toml");

/// Top-level configuration stored in `grc.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub portal: PortalConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Backend location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to. No trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Customer portal settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Value sent in the `X-API-Key` header by portal requests.
    #[serde(default = "default_portal_api_key")]
    pub api_key: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_portal_api_key() -> String {
    DEFAULT_PORTAL_API_KEY.to_string()
}

fn default_cookie_name() -> String {
    DEFAULT_COOKIE_NAME.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_key: default_portal_api_key(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
        }
    }
}

impl ClientConfig {
    /// Builder method to point the client at a different backend.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder method to set the portal API key.
    pub fn with_portal_api_key(mut self, key: impl Into<String>) -> Self {
        self.portal.api_key = key.into();
        self
    }

    /// Builder method to rename the session cookie.
    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.session.cookie_name = name.into();
        self
    }

    /// The embedded `grc.toml`, overridden by variables present when the
    /// crate was compiled.
    pub fn from_build_env() -> Self {
        let mut config = Self::from_toml(COMPILED_TOML).unwrap_or_else(|e| {
            tracing::error!("Ignoring invalid grc.toml: {}", e);
            Self::default()
        });
        if let Some(url) = option_env!("GRC_API_URL") {
            config = config.with_base_url(url);
        }
        if let Some(key) = option_env!("GRC_PORTAL_API_KEY") {
            config = config.with_portal_api_key(key);
        }
        if let Some(name) = option_env!("GRC_SESSION_COOKIE").filter(|n| !n.trim().is_empty()) {
            config = config.with_cookie_name(name.trim());
        }
        config
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        let config: Self = toml::from_str(s)?;
        let base_url = config.api.base_url.clone();
        Ok(config.with_base_url(base_url))
    }
}
