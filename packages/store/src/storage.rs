//! # Key-value storage scopes
//!
//! The session layer persists two string values (`token`, `userInfo`) into one
//! of two scopes that only differ in how long they survive:
//!
//! | Scope | Browser backend | Retention |
//! |-------|-----------------|-----------|
//! | [`StorageScope::Durable`] | `localStorage` | Across browser sessions |
//! | [`StorageScope::Ephemeral`] | `sessionStorage` | Until the tab is closed |
//!
//! Implementations of [`KeyValueStorage`] live in sibling modules
//! ([`crate::memory`], [`crate::browser`]).
//!
//! All access is synchronous. Backends never surface errors to the caller: a
//! storage that is unavailable or rejects a write logs the failure and behaves
//! like an empty store.

use std::fmt;

/// Which of the two storage scopes a value lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageScope {
    Durable,
    Ephemeral,
}

impl StorageScope {
    /// The other scope.
    pub fn opposite(self) -> Self {
        match self {
            StorageScope::Durable => StorageScope::Ephemeral,
            StorageScope::Ephemeral => StorageScope::Durable,
        }
    }
}

impl fmt::Display for StorageScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageScope::Durable => f.write_str("durable"),
            StorageScope::Ephemeral => f.write_str("ephemeral"),
        }
    }
}

/// Synchronous string key-value storage.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}
