//! Session store: the single source of truth for "who is logged in".
//!
//! DESIGN
//! ======
//! One store per client storage. The store starts in the loading state and
//! only answers after `restore()`; guards treat loading as "decide later".
//! Every `set`/`clear` writes through to storage immediately, and a record
//! that fails to parse is discarded rather than surfaced as an error.

use super::Session;
use super::storage::{SESSION_KEY, SessionStorage};

#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    session: Option<Session>,
    loading: bool,
}

impl<S: SessionStorage> SessionStore<S> {
    /// A store that has not yet read its storage.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self { storage, session: None, loading: true }
    }

    /// Build a store and immediately restore from storage.
    #[must_use]
    pub fn restored(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.restore();
        store
    }

    /// Load the persisted record. Unparseable data is removed from storage
    /// and the store comes up empty. No expiry check is applied.
    pub fn restore(&mut self) {
        self.session = match self.storage.read(SESSION_KEY) {
            None => None,
            Some(raw) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => Some(session.normalized()),
                Err(e) => {
                    tracing::debug!(error = %e, "discarding malformed persisted session");
                    self.storage.remove(SESSION_KEY);
                    None
                }
            },
        };
        self.loading = false;
    }

    /// Replace the active session and persist it.
    pub fn set(&mut self, session: Session) {
        match serde_json::to_string(&session) {
            Ok(raw) => self.storage.write(SESSION_KEY, &raw),
            Err(e) => tracing::warn!(error = %e, "session not persisted"),
        }
        self.session = Some(session);
        self.loading = false;
    }

    /// Remove the active session and its persisted copy.
    pub fn clear(&mut self) {
        self.session = None;
        self.storage.remove(SESSION_KEY);
        self.loading = false;
    }

    #[must_use]
    pub fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Hand the storage back, e.g. to emit cookie changes on a response.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
