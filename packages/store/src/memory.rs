use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::{KeyValueStore, StoreError};

/// In-memory store for tests and non-browser targets.
///
/// Clones share the same map, so two handles behave like two tabs reading the
/// same `localStorage`.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Profile {
        id: String,
        email: String,
    }

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get("access_token").is_none());

        store.set("access_token", "abc").unwrap();
        assert_eq!(store.get("access_token").as_deref(), Some("abc"));

        store.set("access_token", "def").unwrap();
        assert_eq!(store.get("access_token").as_deref(), Some("def"));
        assert_eq!(store.len(), 1);

        store.remove("access_token");
        assert!(store.get("access_token").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let store = MemoryStore::new();
        store.remove("nothing");
        assert!(store.is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.set("user", "{}").unwrap();
        assert_eq!(b.get("user").as_deref(), Some("{}"));
    }

    #[test]
    fn test_json_helpers() {
        let store = MemoryStore::new();
        let profile = Profile {
            id: "1".to_string(),
            email: "a@b.com".to_string(),
        };
        store.set_json("user", &profile).unwrap();
        assert_eq!(store.get_json::<Profile>("user"), Some(profile));
    }

    #[test]
    fn test_malformed_json_reads_as_absent() {
        let store = MemoryStore::new();
        store.set("user", "not json").unwrap();
        assert!(store.get_json::<Profile>("user").is_none());
        // The raw entry is left alone.
        assert_eq!(store.get("user").as_deref(), Some("not json"));
    }
}
