//! Key/value storage seam.
//!
//! Browser `localStorage` is synchronous and string-typed, so the trait is too.
//! [`crate::MemoryStore`] backs tests and non-browser builds;
//! `LocalStorageStore` backs the web build.

use thiserror::Error;

/// Well-known storage keys.
pub mod keys {
    /// Session credential (admin platform).
    pub const TOKEN: &str = "token";
    /// JSON-encoded session principal (admin platform).
    pub const USER: &str = "user";
    /// Free-text customer reference (portal).
    pub const CUSTOMER_REF: &str = "customerRef";
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode value: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// String key/value storage with `localStorage` semantics.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str);
}
