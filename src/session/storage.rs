//! Key/value persistence seam for the session record.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mirrors the browser's `localStorage` contract: string values under string
//! keys, reads that may find nothing, writes that never fail loudly. The web
//! host plugs in cookie-backed storage; tests use `MemoryStorage`.

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::{Arc, Mutex, PoisonError};

/// Storage key holding the JSON session record.
pub const SESSION_KEY: &str = "session";

/// Client-held string storage.
pub trait SessionStorage {
    /// Raw value stored under `key`, if any.
    fn read(&self, key: &str) -> Option<String>;
    /// Store `raw` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, raw: &str);
    /// Drop the value under `key`. Missing keys are ignored.
    fn remove(&mut self, key: &str);
}

/// In-process storage. Clones share the same map, so a second store built
/// from a clone behaves like a page reload over the same browser storage.
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

#[cfg(test)]
impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one raw entry.
    #[must_use]
    pub fn with_entry(key: &str, raw: &str) -> Self {
        let storage = Self::new();
        storage.lock().insert(key.to_owned(), raw.to_owned());
        storage
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
impl SessionStorage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn write(&mut self, key: &str, raw: &str) {
        self.lock().insert(key.to_owned(), raw.to_owned());
    }

    fn remove(&mut self, key: &str) {
        self.lock().remove(key);
    }
}
