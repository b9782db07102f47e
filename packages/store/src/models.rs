//! # User profile model
//!
//! [`UserInfo`] is the profile object kept next to the auth token. The server
//! decides its shape, so it is an open JSON object: every key the server sends
//! is kept and written back to storage verbatim.
//!
//! The fields most backends send have typed read accessors:
//!
//! | Accessor | JSON key | Type |
//! |----------|----------|------|
//! | [`id`](UserInfo::id) | `id` | string or number |
//! | [`username`](UserInfo::username) | `username` | string |
//! | [`nickname`](UserInfo::nickname) | `nickname` | string |
//! | [`avatar`](UserInfo::avatar) | `avatar` | string |
//! | [`email`](UserInfo::email) | `email` | string |
//! | [`phone`](UserInfo::phone) | `phone` | string |
//! | [`roles`](UserInfo::roles) | `roles` | array of strings |
//! | [`permissions`](UserInfo::permissions) | `permissions` | array of strings |
//!
//! A key holding a value of the wrong type reads as absent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open user profile object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserInfo(Map<String, Value>);

impl UserInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set a field.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Shallow merge: top-level keys of `partial` overwrite ours, nested
    /// objects are replaced, not merged.
    pub fn merge(&mut self, partial: UserInfo) {
        self.0.extend(partial.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Parse from the JSON text kept in storage. Only objects are accepted.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Serialize to the JSON text kept in storage.
    pub fn to_json(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }

    /// User id as a string. Numeric ids are formatted.
    pub fn id(&self) -> Option<String> {
        match self.get("id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.str_field("username")
    }

    pub fn nickname(&self) -> Option<&str> {
        self.str_field("nickname")
    }

    pub fn avatar(&self) -> Option<&str> {
        self.str_field("avatar")
    }

    pub fn email(&self) -> Option<&str> {
        self.str_field("email")
    }

    pub fn phone(&self) -> Option<&str> {
        self.str_field("phone")
    }

    pub fn roles(&self) -> Vec<&str> {
        self.str_list("roles")
    }

    pub fn permissions(&self) -> Vec<&str> {
        self.str_list("permissions")
    }

    /// Get display name, falling back from nickname to username to email.
    pub fn display_name(&self) -> Option<&str> {
        self.nickname()
            .or_else(|| self.username())
            .or_else(|| self.email())
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str()
    }

    fn str_list(&self, key: &str) -> Vec<&str> {
        match self.get(key) {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

impl From<Map<String, Value>> for UserInfo {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_accessors() {
        let info = UserInfo::new()
            .with("id", 42)
            .with("username", "ada")
            .with("roles", json!(["admin", 7, "editor"]))
            .with("email", json!(null));

        assert_eq!(info.id(), Some("42".to_string()));
        assert_eq!(info.username(), Some("ada"));
        assert_eq!(info.roles(), vec!["admin", "editor"]);
        assert!(info.permissions().is_empty());
        assert!(info.email().is_none());
    }

    #[test]
    fn test_display_name_fallback() {
        let info = UserInfo::new().with("email", "ada@example.com");
        assert_eq!(info.display_name(), Some("ada@example.com"));

        let info = info.with("username", "ada");
        assert_eq!(info.display_name(), Some("ada"));

        let info = info.with("nickname", "Countess");
        assert_eq!(info.display_name(), Some("Countess"));
    }

    #[test]
    fn test_merge_is_shallow() {
        let mut info = UserInfo::new()
            .with("username", "ada")
            .with("prefs", json!({"theme": "dark", "lang": "en"}));

        info.merge(UserInfo::new().with("prefs", json!({"theme": "light"})).with("phone", "123"));

        assert_eq!(info.username(), Some("ada"));
        assert_eq!(info.phone(), Some("123"));
        assert_eq!(info.get("prefs"), Some(&json!({"theme": "light"})));
    }

    #[test]
    fn test_extension_fields_survive_json() {
        let info = UserInfo::new()
            .with("username", "ada")
            .with("tenant", json!({"id": 3, "tags": ["a", "b"]}));

        let parsed = UserInfo::from_json(&info.to_json()).unwrap();
        assert_eq!(parsed, info);
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        assert!(UserInfo::from_json("[1, 2]").is_err());
        assert!(UserInfo::from_json("{not json").is_err());
        assert!(UserInfo::from_json("{}").unwrap().is_empty());
    }
}
