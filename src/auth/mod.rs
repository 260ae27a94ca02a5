//! Authentication: identity-provider seam, mock provider, and the service that
//! ties a provider to a client's session store.
//!
//! ARCHITECTURE
//! ============
//! `IdentityProvider` is the contract any identity backend must satisfy.
//! `AuthService` owns the provider plus a per-client submission gate and
//! applies results to a `SessionStore`. The store only changes after a
//! provider call succeeds, so a failed attempt leaves the visitor where they
//! were.

pub mod gate;
pub mod mock;
pub mod service;
pub mod validate;

use async_trait::async_trait;

use crate::session::Session;

pub use gate::SubmissionGate;
pub use mock::MockIdentityProvider;
pub use service::AuthService;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("{0}")]
    InvalidInput(&'static str),
    #[error("another request is already in progress")]
    Busy,
    #[error("not signed in")]
    NotSignedIn,
    #[error("invalid or expired verification link")]
    InvalidToken,
    #[error("identity provider error: {0}")]
    Provider(String),
}

impl AuthError {
    /// Text shown to the visitor in the error toast.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(msg) => (*msg).to_owned(),
            Self::Busy => "Please wait for the previous request to finish.".to_owned(),
            Self::NotSignedIn => "Please log in to continue.".to_owned(),
            Self::InvalidToken => "That verification link is invalid or has already been used.".to_owned(),
            Self::Provider(_) => "Something went wrong. Please try again.".to_owned(),
        }
    }
}

/// Identity backend contract. Any implementation is interchangeable.
///
/// Inputs arrive already validated and normalized by `AuthService`.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange credentials for a session.
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Create a provisional account and send its verification email.
    async fn signup(&self, name: &str, email: &str, password: &str) -> Result<Session, AuthError>;

    /// End the session on the provider side.
    async fn logout(&self, session: &Session) -> Result<(), AuthError>;

    /// Whether the session's email has been confirmed.
    async fn verification_status(&self, session: &Session) -> Result<bool, AuthError>;

    /// Send a fresh verification email.
    async fn resend_verification(&self, session: &Session) -> Result<(), AuthError>;

    /// Consume a verification token, returning the confirmed email.
    async fn confirm_email(&self, token: &str) -> Result<String, AuthError>;

    /// Start password recovery for `email`.
    async fn request_password_reset(&self, email: &str) -> Result<(), AuthError>;

    /// Latest verification link for `email`, when the provider is configured
    /// to echo it back (development only).
    fn echoed_verification_link(&self, _email: &str) -> Option<String> {
        None
    }
}
