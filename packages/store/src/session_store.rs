//! # Persisted sessions
//!
//! [`SessionStore`] keeps the admin session under the `token` and `user` keys;
//! [`CustomerRefStore`] keeps the portal's `customerRef`. Both work over any
//! [`KeyValueStore`].
//!
//! Loading is strict about the pairing: a `user` entry that does not parse
//! clears both keys, and a lone `token` or lone `user` loads as
//! [`SessionContext::Unauthenticated`].

use crate::kv::{keys, KeyValueStore, StoreError};
use crate::session::{Credential, Principal, SessionContext};

pub struct SessionStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read the persisted session.
    pub fn load(&self) -> SessionContext {
        let credential = self.store.get(keys::TOKEN).and_then(Credential::new);
        let Some(user_json) = self.store.get(keys::USER) else {
            return SessionContext::Unauthenticated;
        };

        match serde_json::from_str::<Principal>(&user_json) {
            Ok(principal) => SessionContext::new(credential, Some(principal)),
            Err(e) => {
                tracing::error!("Failed to parse stored user: {}", e);
                self.clear();
                SessionContext::Unauthenticated
            }
        }
    }

    /// Persist a freshly issued session, overwriting any previous one.
    pub fn save(&self, credential: &Credential, principal: &Principal) -> Result<(), StoreError> {
        let user_json = serde_json::to_string(principal)?;
        self.store.set(keys::TOKEN, credential.as_str())?;
        self.store.set(keys::USER, &user_json)?;
        Ok(())
    }

    pub fn clear(&self) {
        self.store.remove(keys::TOKEN);
        self.store.remove(keys::USER);
    }
}

pub struct CustomerRefStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> CustomerRefStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Option<String> {
        self.store
            .get(keys::CUSTOMER_REF)
            .filter(|r| !r.trim().is_empty())
    }

    /// Store a trimmed reference. Blank input is rejected and returns `None`.
    pub fn save(&self, customer_ref: &str) -> Result<Option<String>, StoreError> {
        let customer_ref = customer_ref.trim();
        if customer_ref.is_empty() {
            return Ok(None);
        }
        self.store.set(keys::CUSTOMER_REF, customer_ref)?;
        Ok(Some(customer_ref.to_string()))
    }

    pub fn clear(&self) {
        self.store.remove(keys::CUSTOMER_REF);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;
    use crate::MemoryStore;

    fn admin() -> Principal {
        Principal {
            id: "u-1".to_string(),
            email: "admin@company.com".to_string(),
            name: "Admin".to_string(),
            role: Role::Admin,
            onboarding_completed: true,
        }
    }

    #[test]
    fn test_save_then_load() {
        let mem = MemoryStore::new();
        let sessions = SessionStore::new(mem.clone());
        assert_eq!(sessions.load(), SessionContext::Unauthenticated);

        let credential = Credential::new("tok-1").unwrap();
        sessions.save(&credential, &admin()).unwrap();

        assert_eq!(mem.get(keys::TOKEN).as_deref(), Some("tok-1"));
        let loaded = sessions.load();
        assert_eq!(loaded.credential(), Some(&credential));
        assert_eq!(loaded.role(), Some(Role::Admin));
    }

    #[test]
    fn test_user_without_token_is_unauthenticated() {
        let mem = MemoryStore::new();
        mem.set(keys::USER, &serde_json::to_string(&admin()).unwrap())
            .unwrap();
        let sessions = SessionStore::new(mem);
        assert!(!sessions.load().is_authenticated());
    }

    #[test]
    fn test_corrupt_user_clears_session() {
        let mem = MemoryStore::new();
        mem.set(keys::TOKEN, "tok-1").unwrap();
        mem.set(keys::USER, "{not json").unwrap();

        let sessions = SessionStore::new(mem.clone());
        assert_eq!(sessions.load(), SessionContext::Unauthenticated);
        assert!(mem.get(keys::TOKEN).is_none());
        assert!(mem.get(keys::USER).is_none());
    }

    #[test]
    fn test_clear_removes_both_keys() {
        let mem = MemoryStore::new();
        let sessions = SessionStore::new(mem.clone());
        sessions
            .save(&Credential::new("tok-1").unwrap(), &admin())
            .unwrap();
        sessions.clear();
        assert!(mem.is_empty());
    }

    #[test]
    fn test_customer_ref_is_trimmed_and_blank_rejected() {
        let mem = MemoryStore::new();
        let refs = CustomerRefStore::new(mem.clone());

        assert_eq!(refs.save("   ").unwrap(), None);
        assert!(refs.load().is_none());

        assert_eq!(refs.save("  CUST-42 ").unwrap().as_deref(), Some("CUST-42"));
        assert_eq!(refs.load().as_deref(), Some("CUST-42"));

        refs.clear();
        assert!(refs.load().is_none());
    }
}
