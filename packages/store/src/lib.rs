//! Browser-local persistence and client configuration shared by the admin
//! platform and the customer portal.

pub mod config;
pub mod kv;
pub mod session;
pub mod session_store;

mod memory;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::{clear_session_cookie, set_session_cookie, LocalStorageStore};

pub use config::ClientConfig;
pub use kv::{KeyValueStore, StoreError};
pub use session::{Credential, Principal, Role, SessionContext};
pub use session_store::{CustomerRefStore, SessionStore};
