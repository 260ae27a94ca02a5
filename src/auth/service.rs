//! Auth service: applies identity-provider results to a client's session store.
//!
//! DESIGN
//! ======
//! Every operation first claims the client's submission slot, then calls the
//! provider, and only writes the store after the provider succeeded. Errors
//! propagate to the caller, which turns them into a single notification.

use std::sync::Arc;

use uuid::Uuid;

use super::gate::SubmissionGate;
use super::validate;
use super::{AuthError, IdentityProvider};
use crate::session::{Session, SessionStorage, SessionStore};

#[derive(Clone)]
pub struct AuthService {
    provider: Arc<dyn IdentityProvider>,
    gate: SubmissionGate,
}

impl AuthService {
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider, gate: SubmissionGate::new() }
    }

    #[cfg(test)]
    #[must_use]
    pub fn gate(&self) -> &SubmissionGate {
        &self.gate
    }

    pub async fn login<S: SessionStorage>(
        &self,
        store: &mut SessionStore<S>,
        client_id: Uuid,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let (email, password) = validate::login_input(email, password).map_err(AuthError::InvalidInput)?;
        let _pending = self.gate.enter(client_id)?;
        let session = self.provider.login(&email, &password).await?;
        tracing::info!(session_id = %session.id, admin = session.is_admin, "login");
        store.set(session.clone());
        Ok(session)
    }

    pub async fn signup<S: SessionStorage>(
        &self,
        store: &mut SessionStore<S>,
        client_id: Uuid,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let (name, email, password) =
            validate::signup_input(name, email, password).map_err(AuthError::InvalidInput)?;
        let _pending = self.gate.enter(client_id)?;
        let session = self.provider.signup(&name, &email, &password).await?;
        tracing::info!(session_id = %session.id, "signup");
        store.set(session.clone());
        Ok(session)
    }

    /// Clear the store. A no-op without a session; provider errors are logged
    /// and never keep the session alive.
    pub async fn logout<S: SessionStorage>(&self, store: &mut SessionStore<S>, client_id: Uuid) -> Result<(), AuthError> {
        let Some(session) = store.current().cloned() else {
            store.clear();
            return Ok(());
        };
        let _pending = self.gate.enter(client_id)?;
        if let Err(e) = self.provider.logout(&session).await {
            tracing::warn!(error = %e, session_id = %session.id, "provider logout failed");
        }
        store.clear();
        tracing::info!(session_id = %session.id, "logout");
        Ok(())
    }

    /// Re-query verification and persist any change. Returns the current status.
    pub async fn check_verification<S: SessionStorage>(
        &self,
        store: &mut SessionStore<S>,
        client_id: Uuid,
    ) -> Result<bool, AuthError> {
        let mut session = store.current().cloned().ok_or(AuthError::NotSignedIn)?;
        let _pending = self.gate.enter(client_id)?;
        let verified = self.provider.verification_status(&session).await?;
        if verified && !session.is_verified {
            session.mark_verified();
            store.set(session);
        }
        Ok(verified)
    }

    /// Send a new verification email. Returns `false` if already verified.
    pub async fn resend_verification_email<S: SessionStorage>(
        &self,
        store: &SessionStore<S>,
        client_id: Uuid,
    ) -> Result<bool, AuthError> {
        let session = store.current().ok_or(AuthError::NotSignedIn)?;
        if session.is_verified {
            return Ok(false);
        }
        let _pending = self.gate.enter(client_id)?;
        self.provider.resend_verification(session).await?;
        Ok(true)
    }

    /// Consume a verification token. When it belongs to the signed-in
    /// visitor, their session is updated right away.
    pub async fn confirm_email<S: SessionStorage>(
        &self,
        store: &mut SessionStore<S>,
        client_id: Uuid,
        token: &str,
    ) -> Result<String, AuthError> {
        let _pending = self.gate.enter(client_id)?;
        let email = self.provider.confirm_email(token).await?;
        if let Some(session) = store.current() {
            if session.email == email && !session.is_verified {
                let mut session = session.clone();
                session.mark_verified();
                store.set(session);
            }
        }
        Ok(email)
    }

    pub async fn request_password_reset(&self, client_id: Uuid, email: &str) -> Result<(), AuthError> {
        let email = validate::normalize_email(email).ok_or(AuthError::InvalidInput("Enter a valid email address."))?;
        let _pending = self.gate.enter(client_id)?;
        self.provider.request_password_reset(&email).await
    }

    #[must_use]
    pub fn echoed_verification_link(&self, session: &Session) -> Option<String> {
        self.provider.echoed_verification_link(&session.email)
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
