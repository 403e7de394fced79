//! # `localStorage` store and session cookie — browser-side persistence
//!
//! [`LocalStorageStore`] is the [`KeyValueStore`] used by the web build. It looks
//! up `window.localStorage` on every call; a missing window or a storage that
//! throws (private browsing, quota) degrades to "no data" for reads and to
//! [`StoreError::Unavailable`] for writes.
//!
//! The admin platform also mirrors the credential into a cookie so the server
//! can gate navigations before any client code runs. [`set_session_cookie`] and
//! [`clear_session_cookie`] write `document.cookie` directly.

use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, Storage};

use crate::kv::{KeyValueStore, StoreError};

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage =
            Self::storage().ok_or_else(|| StoreError::Unavailable("no localStorage".into()))?;
        storage
            .set_item(key, value)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

fn html_document() -> Option<HtmlDocument> {
    web_sys::window()?.document()?.dyn_into::<HtmlDocument>().ok()
}

/// Mirror the credential into the session cookie.
pub fn set_session_cookie(name: &str, value: &str) -> Result<(), StoreError> {
    let document =
        html_document().ok_or_else(|| StoreError::Unavailable("no document".into()))?;
    document
        .set_cookie(&format!("{name}={value}; path=/; SameSite=Lax"))
        .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
}

pub fn clear_session_cookie(name: &str) {
    if let Some(document) = html_document() {
        let _ = document.set_cookie(&format!("{name}=; path=/; Max-Age=0; SameSite=Lax"));
    }
}
