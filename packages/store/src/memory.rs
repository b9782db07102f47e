use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::storage::KeyValueStorage;

/// In-memory KeyValueStorage for testing and native fallback.
///
/// Clones share the same map, so a test can keep a handle to a scope that
/// has been moved into a [`crate::SessionStore`] and inspect it afterwards.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a storage with existing entries.
    pub fn with_items<'a>(items: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let storage = Self::new();
        for (key, value) in items {
            storage.set_item(key, value);
        }
        storage
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    fn items(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items().insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.items().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_items() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();

        storage.set_item("token", "abc");
        assert_eq!(handle.get_item("token"), Some("abc".to_string()));

        handle.remove_item("token");
        assert!(storage.get_item("token").is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_with_items_seeds_storage() {
        let storage = MemoryStorage::with_items([("a", "1"), ("b", "2")]);
        assert_eq!(storage.len(), 2);
        assert_eq!(storage.get_item("b"), Some("2".to_string()));
    }
}
