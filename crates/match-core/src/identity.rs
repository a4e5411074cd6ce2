//! Session resumption for returning members.
//!
//! A member's token is their member id. Clients keep it between visits so a
//! page reload does not force a re-join. The store is consulted once when a
//! client enters a session; nothing in the matching logic reads it.

use std::collections::HashMap;
use std::sync::RwLock;

/// A remembered membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub token: String,
    pub name: String,
}

/// Storage key for one identity field of a session.
pub fn storage_key(session_id: &str, field: IdentityField) -> String {
    format!("tastebud_{}_{}", session_id, field.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityField {
    Token,
    Name,
}

impl IdentityField {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityField::Token => "token",
            IdentityField::Name => "name",
        }
    }
}

/// Where a client keeps its identity per session.
pub trait IdentityStore {
    /// Look up the identity remembered for `session_id`.
    ///
    /// Returns `None` unless both token and name are present.
    fn resolve(&self, session_id: &str) -> Option<Identity>;

    fn remember(&self, session_id: &str, identity: &Identity);

    fn forget(&self, session_id: &str);
}

/// Key-value identity store held in process memory.
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn resolve(&self, session_id: &str) -> Option<Identity> {
        let token = self.get(&storage_key(session_id, IdentityField::Token))?;
        let name = self.get(&storage_key(session_id, IdentityField::Name))?;
        Some(Identity { token, name })
    }

    fn remember(&self, session_id: &str, identity: &Identity) {
        // A poisoned lock degrades to "not remembered".
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(
                storage_key(session_id, IdentityField::Token),
                identity.token.clone(),
            );
            entries.insert(
                storage_key(session_id, IdentityField::Name),
                identity.name.clone(),
            );
        }
    }

    fn forget(&self, session_id: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(&storage_key(session_id, IdentityField::Token));
            entries.remove(&storage_key(session_id, IdentityField::Name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Identity {
        Identity {
            token: "member-1".to_string(),
            name: "Alice".to_string(),
        }
    }

    #[test]
    fn test_storage_key_format() {
        assert_eq!(storage_key("abc", IdentityField::Token), "tastebud_abc_token");
        assert_eq!(storage_key("abc", IdentityField::Name), "tastebud_abc_name");
    }

    #[test]
    fn test_remember_and_resolve() {
        let store = MemoryIdentityStore::new();
        assert!(store.resolve("s1").is_none());

        store.remember("s1", &alice());
        assert_eq!(store.resolve("s1"), Some(alice()));
        assert!(store.resolve("s2").is_none());
    }

    #[test]
    fn test_forget_clears_identity() {
        let store = MemoryIdentityStore::new();
        store.remember("s1", &alice());
        store.forget("s1");
        assert!(store.resolve("s1").is_none());
    }
}
