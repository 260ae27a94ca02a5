//! Mock identity provider.
//!
//! DESIGN
//! ======
//! Stands in for a hosted identity service during development. Every call
//! waits a fixed artificial delay. Login performs no credential check: the
//! configured admin email/password pair yields an administrator and any other
//! well-formed pair yields an ordinary registered member. Verification emails
//! go to a `Notifier` (the log by default) and their tokens are kept only as
//! SHA-256 hashes.
//!
//! TRADE-OFFS
//! ==========
//! Nothing here is a real authentication boundary. It exists so the guard and
//! page shell can be exercised end to end without an external service.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use sha2::{Digest, Sha256};

use super::validate::name_from_email;
use super::{AuthError, IdentityProvider};
use crate::notify::{Notification, Notifier, TracingNotifier};
use crate::session::Session;

const ADMIN_DISPLAY_NAME: &str = "Administrator";

/// A message the mock would have sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub link: String,
}

#[derive(Default)]
struct MockInner {
    /// sha256(token) -> email awaiting confirmation.
    pending: HashMap<String, String>,
    confirmed: HashSet<String>,
    outbox: Vec<OutboundEmail>,
}

pub struct MockIdentityProvider {
    admin_email: String,
    admin_password: String,
    delay: Duration,
    base_url: String,
    echo_links: bool,
    mailer: Arc<dyn Notifier>,
    inner: Mutex<MockInner>,
}

impl MockIdentityProvider {
    #[must_use]
    pub fn new(admin_email: impl Into<String>, admin_password: impl Into<String>, delay: Duration) -> Self {
        Self {
            admin_email: admin_email.into().trim().to_ascii_lowercase(),
            admin_password: admin_password.into(),
            delay,
            base_url: String::new(),
            echo_links: false,
            mailer: Arc::new(TracingNotifier),
            inner: Mutex::new(MockInner::default()),
        }
    }

    /// Prefix for links in outgoing emails, e.g. `http://localhost:3000`.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Expose the latest verification link to the page shell.
    #[must_use]
    pub fn with_echoed_links(mut self, echo: bool) -> Self {
        self.echo_links = echo;
        self
    }

    /// Channel that receives outgoing emails.
    #[cfg(test)]
    #[must_use]
    pub fn with_mailer(mut self, mailer: Arc<dyn Notifier>) -> Self {
        self.mailer = mailer;
        self
    }

    /// Everything "sent" so far, oldest first.
    #[cfg(test)]
    #[must_use]
    pub fn outbox(&self) -> Vec<OutboundEmail> {
        self.lock().outbox.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    fn is_confirmed(&self, email: &str) -> bool {
        self.lock().confirmed.contains(email)
    }

    /// Issue a fresh token for `email`, revoking any earlier unused one.
    fn send_verification(&self, email: &str) {
        let token = generate_token();
        let link = format!("{}/confirm-email/{token}", self.base_url);
        let message = OutboundEmail {
            to: email.to_owned(),
            subject: "Confirm your email address".to_owned(),
            link: link.clone(),
        };
        {
            let mut inner = self.lock();
            inner.pending.retain(|_, pending_email| pending_email != email);
            inner.pending.insert(hash_token(&token), email.to_owned());
            inner.outbox.push(message);
        }
        tracing::info!(%email, "verification email queued");
        self.mailer
            .notify(Notification::info(format!("Verification email to {email}: {link}")));
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.pause().await;
        if email == self.admin_email && password == self.admin_password {
            return Ok(Session::admin(ADMIN_DISPLAY_NAME, email));
        }
        Ok(Session::member(name_from_email(email), email, self.is_confirmed(email)))
    }

    async fn signup(&self, name: &str, email: &str, _password: &str) -> Result<Session, AuthError> {
        self.pause().await;
        let session = Session::provisional(name, email);
        self.send_verification(email);
        Ok(session)
    }

    async fn logout(&self, session: &Session) -> Result<(), AuthError> {
        self.pause().await;
        tracing::debug!(session_id = %session.id, "mock logout");
        Ok(())
    }

    async fn verification_status(&self, session: &Session) -> Result<bool, AuthError> {
        self.pause().await;
        Ok(session.is_admin || self.is_confirmed(&session.email))
    }

    async fn resend_verification(&self, session: &Session) -> Result<(), AuthError> {
        self.pause().await;
        self.send_verification(&session.email);
        Ok(())
    }

    async fn confirm_email(&self, token: &str) -> Result<String, AuthError> {
        let mut inner = self.lock();
        let email = inner
            .pending
            .remove(&hash_token(token.trim()))
            .ok_or(AuthError::InvalidToken)?;
        inner.confirmed.insert(email.clone());
        Ok(email)
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        self.pause().await;
        tracing::info!(%email, "mock password reset requested");
        self.mailer
            .notify(Notification::info(format!("Password reset instructions for {email}")));
        Ok(())
    }

    fn echoed_verification_link(&self, email: &str) -> Option<String> {
        if !self.echo_links {
            return None;
        }
        self.lock()
            .outbox
            .iter()
            .rev()
            .find(|m| m.to == email)
            .map(|m| m.link.clone())
    }
}

/// Random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    hex::encode(bytes)
}

#[must_use]
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
#[path = "mock_test.rs"]
mod tests;
