//! # Web Storage backend — browser-side persistence
//!
//! [`BrowserStorage`] is the [`KeyValueStorage`] implementation used on the
//! **web platform**. Each instance is bound to one [`StorageScope`]:
//!
//! | Scope | `window` accessor |
//! |-------|-------------------|
//! | `Durable` | `window.localStorage` |
//! | `Ephemeral` | `window.sessionStorage` |
//!
//! ## Connection management
//!
//! `BrowserStorage` is a `Copy` handle that looks up the `Storage` object on
//! every call. `web_sys::Storage` is not `Send` and can disappear (e.g. when
//! the user blocks site data), so nothing is cached.
//!
//! ## Error handling
//!
//! Failures never propagate. Reads degrade to `None`, writes and removals are
//! dropped; each failure is logged at `warn` level with the scope and key.

use crate::storage::{KeyValueStorage, StorageScope};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrowserStorage {
    scope: StorageScope,
}

impl BrowserStorage {
    pub fn new(scope: StorageScope) -> Self {
        Self { scope }
    }

    /// `window.localStorage`
    pub fn local() -> Self {
        Self::new(StorageScope::Durable)
    }

    /// `window.sessionStorage`
    pub fn session() -> Self {
        Self::new(StorageScope::Ephemeral)
    }

    pub fn scope(&self) -> StorageScope {
        self.scope
    }

    fn backend(&self) -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        let storage = match self.scope {
            StorageScope::Durable => window.local_storage(),
            StorageScope::Ephemeral => window.session_storage(),
        };
        match storage {
            Ok(Some(storage)) => Some(storage),
            Ok(None) => {
                tracing::warn!(scope = %self.scope, "web storage is not available");
                None
            }
            Err(e) => {
                tracing::warn!(scope = %self.scope, error = ?e, "web storage access denied");
                None
            }
        }
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        let storage = self.backend()?;
        match storage.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(scope = %self.scope, key, error = ?e, "failed to read storage item");
                None
            }
        }
    }

    fn set_item(&self, key: &str, value: &str) {
        let Some(storage) = self.backend() else {
            return;
        };
        if let Err(e) = storage.set_item(key, value) {
            tracing::warn!(scope = %self.scope, key, error = ?e, "failed to write storage item");
        }
    }

    fn remove_item(&self, key: &str) {
        let Some(storage) = self.backend() else {
            return;
        };
        if let Err(e) = storage.remove_item(key) {
            tracing::warn!(scope = %self.scope, key, error = ?e, "failed to remove storage item");
        }
    }
}
