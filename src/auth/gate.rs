//! Per-client double-submission guard.
//!
//! DESIGN
//! ======
//! A client may have one auth operation in flight. The set of busy client
//! ids sits behind a `Mutex`; the returned `Pending` guard releases the slot
//! when dropped, including on early returns and errors.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use uuid::Uuid;

use super::AuthError;

#[derive(Clone, Debug, Default)]
pub struct SubmissionGate {
    busy: Arc<Mutex<HashSet<Uuid>>>,
}

/// Held while an operation for `client_id` is running.
#[derive(Debug)]
pub struct Pending {
    busy: Arc<Mutex<HashSet<Uuid>>>,
    client_id: Uuid,
}

impl SubmissionGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for `client_id`, or fail with `Busy` if it is taken.
    pub fn enter(&self, client_id: Uuid) -> Result<Pending, AuthError> {
        let mut busy = self.busy.lock().unwrap_or_else(PoisonError::into_inner);
        if !busy.insert(client_id) {
            return Err(AuthError::Busy);
        }
        Ok(Pending { busy: Arc::clone(&self.busy), client_id })
    }

    #[cfg(test)]
    #[must_use]
    pub fn is_pending(&self, client_id: Uuid) -> bool {
        self.busy
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&client_id)
    }
}

impl Drop for Pending {
    fn drop(&mut self) {
        self.busy
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.client_id);
    }
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;
