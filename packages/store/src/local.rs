//! # localStorage store — browser-side persistence
//!
//! [`LocalStore`] is the [`KeyValueStore`] used on the **web platform**. It
//! resolves `window.localStorage` on every call rather than caching the handle,
//! since `web_sys::Storage` is not `Send` and the lookup is cheap.
//!
//! Reads swallow errors (a blocked or missing storage reads as empty). Writes
//! report [`StoreError`] so the session layer can refuse to report a login that
//! would not survive a reload.

use crate::{KeyValueStore, StoreError};

/// `window.localStorage`-backed store.
#[derive(Clone, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = self.storage().ok_or(StoreError::Unavailable)?;
        storage.set_item(key, value).map_err(|e| StoreError::Write {
            key: key.to_string(),
            reason: e.as_string().unwrap_or_else(|| format!("{e:?}")),
        })
    }

    fn remove(&self, key: &str) {
        let Some(storage) = self.storage() else {
            return;
        };
        if let Err(e) = storage.remove_item(key) {
            tracing::warn!("Failed to remove `{key}` from localStorage: {e:?}");
        }
    }
}
