//! Cached session - source of the "is authenticated" signal
//!
//! The client keeps exactly one thing across page loads: the current session
//! (token plus user) serialized as JSON under a single local-storage key.
//! The user counts as authenticated only when both are present.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};

use crate::error::Result;

/// Default local-storage key for the cached session
pub const DEFAULT_SESSION_KEY: &str = "ticketapp_session";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUser {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

/// Stored form, `{ "token": "...", "user": { ... } }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredSession {
    #[serde(default)]
    pub token: String,
    pub user: Option<SessionUser>,
}

impl StoredSession {
    /// Fresh session for `user` with a `session-<unix millis>` token.
    pub fn issue(user: SessionUser) -> Self {
        Self {
            token: format!("session-{}", Utc::now().timestamp_millis()),
            user: Some(user),
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.token.is_empty() && self.user.is_some()
    }
}

/// String key/value storage with the shape of `window.localStorage`.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

/// `window.localStorage` backed store.
#[cfg(target_arch = "wasm32")]
pub struct BrowserStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl BrowserStore {
    pub fn new() -> Result<Self> {
        use crate::error::Error;

        let storage = web_sys::window()
            .ok_or(Error::StorageUnavailable)?
            .local_storage()
            .map_err(|_| Error::StorageUnavailable)?
            .ok_or(Error::StorageUnavailable)?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| crate::error::Error::Storage(format!("{:?}", e)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| crate::error::Error::Storage(format!("{:?}", e)))
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| crate::error::Error::Storage(format!("{:?}", e)))
    }
}

/// Session access over a store, bound to one key.
pub struct SessionCache<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> SessionCache<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Strict read: storage and parse failures are returned.
    pub fn try_load(&self) -> Result<Option<StoredSession>> {
        let Some(raw) = self.store.get_item(&self.key)? else {
            return Ok(None);
        };
        let session: StoredSession = serde_json::from_str(&raw)?;
        Ok(Some(session).filter(StoredSession::is_valid))
    }

    /// Lenient read used at startup: anything unreadable counts as no session.
    pub fn load(&self) -> Option<StoredSession> {
        self.try_load().unwrap_or_else(|e| {
            warn!("Failed to read stored session: {}", e);
            None
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.load().is_some()
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.load().and_then(|session| session.user)
    }

    /// Issue and store a session for `user`, returning it.
    pub fn persist(&mut self, user: SessionUser) -> Result<StoredSession> {
        let session = StoredSession::issue(user);
        let raw = serde_json::to_string(&session)?;
        self.store.set_item(&self.key, &raw)?;
        info!(key = %self.key, "Session stored");
        Ok(session)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.store.remove_item(&self.key)?;
        info!(key = %self.key, "Session cleared");
        Ok(())
    }
}
