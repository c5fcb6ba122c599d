//! # Durable client storage
//!
//! The session layer persists a bearer token and a user snapshot between page
//! loads. This crate abstracts over where those bytes live:
//!
//! | Store | Platform | Backing |
//! |-------|----------|---------|
//! | [`LocalStore`] | WASM + `web` feature | `window.localStorage` |
//! | [`MemoryStore`] | everywhere | process memory (tests, non-browser targets) |
//!
//! Both implement [`KeyValueStore`], a synchronous string-keyed interface that
//! mirrors the browser storage API.

use serde::de::DeserializeOwned;
use serde::Serialize;

mod memory;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStore;

/// Errors raised by a [`KeyValueStore`] write.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("client storage is unavailable")]
    Unavailable,
    #[error("failed to write `{key}` to client storage: {reason}")]
    Write { key: String, reason: String },
    #[error("failed to encode `{key}`: {reason}")]
    Encode { key: String, reason: String },
}

/// Synchronous string key/value storage.
///
/// Reads never fail: a missing key and an unreadable store both yield `None`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str);

    /// Read and decode a JSON value. Undecodable entries are treated as absent.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring malformed `{key}` in client storage: {e}");
                None
            }
        }
    }

    /// Encode a value as JSON and write it.
    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|e| StoreError::Encode {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        self.set(key, &raw)
    }
}
