//! Platform-appropriate client storage for the session layer.
//!
//! - **Web** (WASM + `web` feature): `window.localStorage` via [`store::LocalStore`]
//! - **Everything else**: process memory via [`store::MemoryStore`], so a
//!   native build simply forgets the session on exit.

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type ClientStore = store::LocalStore;

#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type ClientStore = store::MemoryStore;

/// Create the storage the session manager persists into.
pub fn make_storage() -> ClientStore {
    ClientStore::new()
}
