//! Shared client and storage constructors for every view.
//!
//! - **Web** (WASM + `web` feature): `localStorage` via [`store::LocalStorageStore`]
//! - **Elsewhere** (server-side rendering, native tests): one process-wide
//!   [`store::MemoryStore`], which starts empty so every render is unauthenticated

use api::{GrcClient, ReqwestTransport};
use store::ClientConfig;

pub type Client = GrcClient<ReqwestTransport>;

/// Configuration compiled into this build.
pub fn config() -> ClientConfig {
    ClientConfig::from_build_env()
}

/// Create a REST client pointed at the configured backend.
pub fn make_client() -> Client {
    GrcClient::new(ReqwestTransport::new(), &config())
}

/// Create a platform-appropriate key/value store.
pub fn make_kv() -> impl store::KeyValueStore + Clone {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorageStore::new()
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        static STORE: std::sync::OnceLock<store::MemoryStore> = std::sync::OnceLock::new();
        STORE.get_or_init(store::MemoryStore::new).clone()
    }
}

/// Mirror the credential into the cookie the server-side gate reads.
pub(crate) fn write_session_cookie(credential: &store::Credential) {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        if let Err(e) = store::set_session_cookie(&config().session.cookie_name, credential.as_str()) {
            tracing::warn!("Failed to set session cookie: {}", e);
        }
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let _ = credential;
    }
}

pub(crate) fn clear_session_cookie() {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    store::clear_session_cookie(&config().session.cookie_name);
}
