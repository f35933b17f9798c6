//! Durable storage for the single bearer token
//!
//! The store is purely textual: it does not look inside the token or enforce
//! expiry. Storage failures never reach the caller. An unreadable store reads
//! as "no token", which lands the user on the logged-out path.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Default storage key for the bearer token
pub const DEFAULT_STORAGE_KEY: &str = "auth_token";

/// Key-value persistence for one bearer token
pub trait TokenStore {
    /// Current token, or `None` when absent or when storage is unavailable
    fn get(&self) -> Option<String>;

    /// Replace the stored token
    fn set(&self, token: &str);

    /// Remove the stored token
    fn clear(&self);
}

/// Build the `Authorization` header value for requests made on behalf of the
/// signed-in user
pub fn bearer_header(store: &impl TokenStore) -> Option<String> {
    store.get().map(|token| format!("Bearer {token}"))
}

/// In-process token store
///
/// Clones share the same slot, so a test can keep a handle while the session
/// owns another. An unavailable store behaves like a browser with storage
/// disabled: reads are empty and writes are dropped.
#[derive(Debug, Clone)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<String>>>,
    available: bool,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self {
            slot: Arc::default(),
            available: true,
        }
    }

    /// Store pre-populated with a token, as after a previous visit
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        *store.slot() = Some(token.into());
        store
    }

    pub fn unavailable() -> Self {
        Self {
            slot: Arc::default(),
            available: false,
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<String>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        if !self.available {
            return None;
        }
        self.slot().clone()
    }

    fn set(&self, token: &str) {
        if !self.available {
            leptos::logging::warn!("token storage unavailable, token not persisted");
            return;
        }
        *self.slot() = Some(token.to_string());
    }

    fn clear(&self) {
        if self.available {
            self.slot().take();
        }
    }
}

/// Token store backed by the browser's `localStorage`
#[cfg(feature = "hydrate")]
#[derive(Debug, Clone)]
pub struct LocalStorageTokenStore {
    key: String,
}

#[cfg(feature = "hydrate")]
impl LocalStorageTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        match window.local_storage() {
            Ok(Some(storage)) => Some(storage),
            _ => {
                leptos::logging::warn!("localStorage is not available");
                None
            }
        }
    }
}

#[cfg(feature = "hydrate")]
impl TokenStore for LocalStorageTokenStore {
    fn get(&self) -> Option<String> {
        Self::storage()?
            .get_item(&self.key)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
    }

    fn set(&self, token: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(&self.key, token).is_err() {
                leptos::logging::warn!("Failed to persist auth token");
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            if storage.remove_item(&self.key).is_err() {
                leptos::logging::warn!("Failed to remove auth token");
            }
        }
    }
}
