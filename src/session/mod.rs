//! Client-held session record and its persisted store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session is the single answer to "who is browsing": route guards,
//! the page shell and auth handlers all read it. It lives in client-held
//! storage and is self-asserted, so the flags below are trusted only because
//! the site runs outside production (see `config`).

pub mod storage;
pub mod store;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(test)]
pub use storage::MemoryStorage;
pub use storage::SessionStorage;
pub use store::SessionStore;

/// The currently authenticated actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Opaque identifier, fresh for every login or signup.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Normalized contact email.
    pub email: String,
    /// Grants access to the `/admin` namespace.
    #[serde(default)]
    pub is_admin: bool,
    /// Onboarding completed beyond bare signup.
    #[serde(default)]
    pub is_registered: bool,
    /// Email ownership confirmed.
    #[serde(default)]
    pub is_verified: bool,
}

impl Session {
    /// Administrator session. Admins are always registered and verified.
    #[must_use]
    pub fn admin(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            is_admin: true,
            is_registered: true,
            is_verified: true,
        }
    }

    /// Fully onboarded member session.
    #[must_use]
    pub fn member(name: impl Into<String>, email: impl Into<String>, is_verified: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            is_admin: false,
            is_registered: true,
            is_verified,
        }
    }

    /// Provisional session created by signup: neither registered nor verified.
    #[must_use]
    pub fn provisional(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            is_admin: false,
            is_registered: false,
            is_verified: false,
        }
    }

    /// Restore `is_admin => is_registered` on records read back from storage.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.is_admin {
            self.is_registered = true;
        }
        self
    }

    /// Mark the email as confirmed. Confirmation also completes onboarding.
    pub fn mark_verified(&mut self) {
        self.is_verified = true;
        self.is_registered = true;
    }
}
