//! # Session store — auth token and user profile
//!
//! [`SessionStore`] holds the authentication token and the [`UserInfo`] of the
//! signed-in user, and mirrors both into two [`KeyValueStorage`] scopes.
//!
//! ## Persistence policy
//!
//! | Value | Key | Scope |
//! |-------|-----|-------|
//! | token | [`TOKEN_KEY`] | durable when "remember me", ephemeral otherwise; never both |
//! | profile | [`USER_INFO_KEY`] | durable, JSON text |
//!
//! [`SessionStore::new`] loads whatever is already stored. Every mutation is
//! written through to storage immediately.
//!
//! ## Sharing
//!
//! [`SessionContext`] is the handle the rest of the application holds: one is
//! created at start-up and cloned into the HTTP client and the UI tree. It is
//! an `Rc<RefCell<_>>` and therefore single-threaded, matching the browser
//! event loop.
//!
//! Listeners registered with [`SessionContext::subscribe`] run after every
//! mutation made through any clone, whoever made it. The store borrow is
//! released before they run, so a listener may read the session.

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::UserInfo;
use crate::storage::{KeyValueStorage, StorageScope};

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the JSON-encoded profile.
pub const USER_INFO_KEY: &str = "userInfo";

/// Token and profile, backed by a durable and an ephemeral storage scope.
#[derive(Debug)]
pub struct SessionStore<S> {
    durable: S,
    ephemeral: S,
    token: Option<String>,
    user_info: UserInfo,
}

impl<S: KeyValueStorage> SessionStore<S> {
    /// Create a store over the two scopes and load any persisted session.
    pub fn new(durable: S, ephemeral: S) -> Self {
        let mut store = Self {
            durable,
            ephemeral,
            token: None,
            user_info: UserInfo::default(),
        };
        store.load();
        store
    }

    /// Reload token and profile from storage.
    ///
    /// The durable token wins over the ephemeral one; empty strings count as
    /// absent. A profile that fails to parse is logged and replaced by an
    /// empty one.
    pub fn load(&mut self) {
        self.token = self
            .durable
            .get_item(TOKEN_KEY)
            .filter(|t| !t.is_empty())
            .or_else(|| self.ephemeral.get_item(TOKEN_KEY).filter(|t| !t.is_empty()));

        self.user_info = match self.durable.get_item(USER_INFO_KEY) {
            Some(json) => UserInfo::from_json(&json).unwrap_or_else(|e| {
                tracing::error!(error = %e, "failed to parse stored user info");
                UserInfo::default()
            }),
            None => UserInfo::default(),
        };
    }

    /// Store the token in exactly one scope.
    ///
    /// `persist = true` keeps it across browser sessions, `false` only for the
    /// current tab. The other scope is cleared. An empty token removes the
    /// token from both scopes.
    pub fn set_token(&mut self, token: impl Into<String>, persist: bool) {
        let token = token.into();
        if token.is_empty() {
            self.remove_token();
            return;
        }

        let scope = if persist {
            StorageScope::Durable
        } else {
            StorageScope::Ephemeral
        };
        self.scope(scope).set_item(TOKEN_KEY, &token);
        self.scope(scope.opposite()).remove_item(TOKEN_KEY);
        self.token = Some(token);
    }

    /// Replace the profile.
    pub fn set_user_info(&mut self, info: UserInfo) {
        self.user_info = info;
        self.persist_user_info();
    }

    /// Shallow-merge `partial` into the profile.
    pub fn update_user_info(&mut self, partial: UserInfo) {
        self.user_info.merge(partial);
        self.persist_user_info();
    }

    /// Remove token and profile from both scopes and reset in-memory state.
    pub fn clear(&mut self) {
        self.token = None;
        self.user_info = UserInfo::default();
        for storage in [&self.durable, &self.ephemeral] {
            storage.remove_item(TOKEN_KEY);
            storage.remove_item(USER_INFO_KEY);
        }
    }

    pub fn logout(&mut self) {
        self.clear();
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user_info(&self) -> &UserInfo {
        &self.user_info
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// The storage backing a scope.
    pub fn scope(&self, scope: StorageScope) -> &S {
        match scope {
            StorageScope::Durable => &self.durable,
            StorageScope::Ephemeral => &self.ephemeral,
        }
    }

    fn remove_token(&mut self) {
        self.token = None;
        self.durable.remove_item(TOKEN_KEY);
        self.ephemeral.remove_item(TOKEN_KEY);
    }

    fn persist_user_info(&self) {
        self.durable.set_item(USER_INFO_KEY, &self.user_info.to_json());
    }
}

/// Shared handle to a [`SessionStore`].
///
/// Cloning is cheap and every clone sees the same session.
pub struct SessionContext<S> {
    inner: Rc<RefCell<SessionStore<S>>>,
    listeners: Rc<RefCell<Vec<Box<dyn Fn()>>>>,
}

impl<S> Clone for SessionContext<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<S> PartialEq for SessionContext<S> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S: KeyValueStorage> SessionContext<S> {
    pub fn new(store: SessionStore<S>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(store)),
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Open a session over two storage scopes, loading what is stored.
    pub fn open(durable: S, ephemeral: S) -> Self {
        Self::new(SessionStore::new(durable, ephemeral))
    }

    pub fn token(&self) -> Option<String> {
        self.inner.borrow().token().map(str::to_string)
    }

    pub fn user_info(&self) -> UserInfo {
        self.inner.borrow().user_info().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner.borrow().is_logged_in()
    }

    pub fn load(&self) {
        self.inner.borrow_mut().load();
        self.notify();
    }

    pub fn set_token(&self, token: impl Into<String>, persist: bool) {
        self.inner.borrow_mut().set_token(token, persist);
        self.notify();
    }

    pub fn set_user_info(&self, info: UserInfo) {
        self.inner.borrow_mut().set_user_info(info);
        self.notify();
    }

    pub fn update_user_info(&self, partial: UserInfo) {
        self.inner.borrow_mut().update_user_info(partial);
        self.notify();
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
        self.notify();
    }

    pub fn logout(&self) {
        self.inner.borrow_mut().logout();
        self.notify();
    }

    /// Register a callback run after every mutation.
    ///
    /// Listeners may read the session but must neither mutate it nor call
    /// `subscribe`.
    pub fn subscribe(&self, listener: impl Fn() + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    fn notify(&self) {
        for listener in self.listeners.borrow().iter() {
            listener();
        }
    }
}
