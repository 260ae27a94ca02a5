use std::time::Duration;

use async_trait::async_trait;

use super::*;
use crate::auth::MockIdentityProvider;
use crate::session::MemoryStorage;
use crate::session::storage::SESSION_KEY;

/// Provider whose every call fails, as if the backend were unreachable.
struct DownProvider;

#[async_trait]
impl IdentityProvider for DownProvider {
    async fn login(&self, _email: &str, _password: &str) -> Result<Session, AuthError> {
        Err(AuthError::Provider("unreachable".into()))
    }
    async fn signup(&self, _name: &str, _email: &str, _password: &str) -> Result<Session, AuthError> {
        Err(AuthError::Provider("unreachable".into()))
    }
    async fn logout(&self, _session: &Session) -> Result<(), AuthError> {
        Err(AuthError::Provider("unreachable".into()))
    }
    async fn verification_status(&self, _session: &Session) -> Result<bool, AuthError> {
        Err(AuthError::Provider("unreachable".into()))
    }
    async fn resend_verification(&self, _session: &Session) -> Result<(), AuthError> {
        Err(AuthError::Provider("unreachable".into()))
    }
    async fn confirm_email(&self, _token: &str) -> Result<String, AuthError> {
        Err(AuthError::Provider("unreachable".into()))
    }
    async fn request_password_reset(&self, _email: &str) -> Result<(), AuthError> {
        Err(AuthError::Provider("unreachable".into()))
    }
}

fn mock(delay: Duration) -> Arc<MockIdentityProvider> {
    Arc::new(MockIdentityProvider::new("admin@example.org", "letmein", delay))
}

fn service() -> (AuthService, Arc<MockIdentityProvider>) {
    let provider = mock(Duration::ZERO);
    (AuthService::new(provider.clone()), provider)
}

fn store() -> (SessionStore<MemoryStorage>, MemoryStorage) {
    let storage = MemoryStorage::new();
    (SessionStore::restored(storage.clone()), storage)
}

fn verification_token(provider: &MockIdentityProvider) -> String {
    let outbox = provider.outbox();
    outbox.last().unwrap().link.rsplit('/').next().unwrap().to_owned()
}

// =============================================================================
// login / signup
// =============================================================================

#[tokio::test]
async fn login_sets_and_persists_session() {
    let (auth, _) = service();
    let (mut store, storage) = store();
    let session = auth
        .login(&mut store, Uuid::new_v4(), "Ada@Example.org", "pw")
        .await
        .unwrap();

    assert_eq!(session.email, "ada@example.org");
    assert_eq!(store.current(), Some(&session));
    assert_eq!(SessionStore::restored(storage).current(), Some(&session));
}

#[tokio::test]
async fn login_as_admin() {
    let (auth, _) = service();
    let (mut store, _) = store();
    let session = auth
        .login(&mut store, Uuid::new_v4(), "admin@example.org", "letmein")
        .await
        .unwrap();
    assert!(session.is_admin && session.is_registered);
}

#[tokio::test]
async fn invalid_input_never_reaches_store() {
    let (auth, _) = service();
    let (mut store, _) = store();
    let err = auth.login(&mut store, Uuid::new_v4(), "not-an-email", "pw").await.unwrap_err();
    assert_eq!(err, AuthError::InvalidInput("Enter a valid email address."));
    assert!(store.current().is_none());
}

#[tokio::test]
async fn signup_creates_unverified_unregistered_session() {
    let (auth, provider) = service();
    let (mut store, _) = store();
    let session = auth
        .signup(&mut store, Uuid::new_v4(), "Ada", "ada@example.org", "secret1")
        .await
        .unwrap();
    assert!(!session.is_verified);
    assert!(!session.is_registered);
    assert_eq!(provider.outbox().len(), 1);
}

// =============================================================================
// Failure leaves store unchanged
// =============================================================================

#[tokio::test]
async fn provider_failure_leaves_store_unchanged() {
    let auth = AuthService::new(Arc::new(DownProvider));
    let (mut store, storage) = store();
    let existing = Session::member("Ada", "ada@example.org", true);
    store.set(existing.clone());
    let client = Uuid::new_v4();

    let err = auth.login(&mut store, client, "bob@example.org", "pw").await.unwrap_err();
    assert!(matches!(err, AuthError::Provider(_)));
    assert_eq!(store.current(), Some(&existing));
    assert!(storage.read(SESSION_KEY).is_some());
    assert!(!auth.gate().is_pending(client));
}

#[tokio::test]
async fn logout_clears_even_when_provider_fails() {
    let auth = AuthService::new(Arc::new(DownProvider));
    let (mut store, storage) = store();
    store.set(Session::member("Ada", "ada@example.org", true));

    auth.logout(&mut store, Uuid::new_v4()).await.unwrap();
    assert!(store.current().is_none());
    assert_eq!(storage.read(SESSION_KEY), None);
}

// =============================================================================
// logout idempotence
// =============================================================================

#[tokio::test]
async fn logout_twice_is_ok_and_empty() {
    let (auth, _) = service();
    let (mut store, storage) = store();
    let client = Uuid::new_v4();
    auth.login(&mut store, client, "ada@example.org", "pw").await.unwrap();

    auth.logout(&mut store, client).await.unwrap();
    assert!(store.current().is_none());
    auth.logout(&mut store, client).await.unwrap();
    assert!(store.current().is_none());
    assert_eq!(storage.read(SESSION_KEY), None);
}

// =============================================================================
// Double submission
// =============================================================================

#[tokio::test]
async fn overlapping_calls_from_same_client_are_rejected() {
    let auth = AuthService::new(mock(Duration::from_millis(50)));
    let (mut first_store, _) = store();
    let (mut second_store, _) = store();
    let client = Uuid::new_v4();

    let (first, second) = tokio::join!(
        auth.login(&mut first_store, client, "ada@example.org", "pw"),
        auth.login(&mut second_store, client, "ada@example.org", "pw"),
    );
    assert!(first.is_ok());
    assert_eq!(second.unwrap_err(), AuthError::Busy);
    assert!(second_store.current().is_none());
    assert!(!auth.gate().is_pending(client));
}

#[tokio::test]
async fn overlapping_calls_from_different_clients_both_succeed() {
    let auth = AuthService::new(mock(Duration::from_millis(10)));
    let (mut a, _) = store();
    let (mut b, _) = store();
    let (first, second) = tokio::join!(
        auth.login(&mut a, Uuid::new_v4(), "ada@example.org", "pw"),
        auth.login(&mut b, Uuid::new_v4(), "bob@example.org", "pw"),
    );
    assert!(first.is_ok());
    assert!(second.is_ok());
}

// =============================================================================
// Verification
// =============================================================================

#[tokio::test]
async fn check_verification_without_session_fails() {
    let (auth, _) = service();
    let (mut store, _) = store();
    assert_eq!(
        auth.check_verification(&mut store, Uuid::new_v4()).await.unwrap_err(),
        AuthError::NotSignedIn
    );
}

#[tokio::test]
async fn check_verification_updates_store_after_confirmation() {
    let (auth, provider) = service();
    let (mut store, storage) = store();
    let client = Uuid::new_v4();
    auth.signup(&mut store, client, "Ada", "ada@example.org", "secret1").await.unwrap();
    assert!(!auth.check_verification(&mut store, client).await.unwrap());

    // Confirmation happens elsewhere, e.g. in another tab.
    provider.confirm_email(&verification_token(&provider)).await.unwrap();

    assert!(auth.check_verification(&mut store, client).await.unwrap());
    let reloaded = SessionStore::restored(storage);
    let session = reloaded.current().unwrap();
    assert!(session.is_verified);
    assert!(session.is_registered);
}

#[tokio::test]
async fn confirm_email_updates_matching_session() {
    let (auth, provider) = service();
    let (mut store, _) = store();
    auth.signup(&mut store, Uuid::new_v4(), "Ada", "ada@example.org", "secret1").await.unwrap();

    let email = auth.confirm_email(&mut store, Uuid::new_v4(), &verification_token(&provider)).await.unwrap();
    assert_eq!(email, "ada@example.org");
    assert!(store.current().unwrap().is_verified);
}

#[tokio::test]
async fn confirm_email_for_someone_else_leaves_session_alone() {
    let (auth, provider) = service();
    let (mut other_store, _) = store();
    auth.signup(&mut other_store, Uuid::new_v4(), "Bob", "bob@example.org", "secret1").await.unwrap();
    let token = verification_token(&provider);

    let (mut store, _) = store();
    store.set(Session::member("Ada", "ada@example.org", false));
    auth.confirm_email(&mut store, Uuid::new_v4(), &token).await.unwrap();
    assert!(!store.current().unwrap().is_verified);
}

#[tokio::test]
async fn confirm_email_while_another_submission_is_pending_is_busy() {
    let (auth, provider) = service();
    let (mut store, _) = store();
    let client = Uuid::new_v4();
    auth.signup(&mut store, client, "Ada", "ada@example.org", "secret1").await.unwrap();
    let token = verification_token(&provider);

    let held = auth.gate().enter(client).unwrap();
    assert_eq!(auth.confirm_email(&mut store, client, &token).await.unwrap_err(), AuthError::Busy);
    assert!(!store.current().unwrap().is_verified);
    drop(held);

    // The token was not consumed by the rejected attempt.
    assert!(auth.confirm_email(&mut store, client, &token).await.is_ok());
    assert!(store.current().unwrap().is_verified);
}

#[tokio::test]
async fn resend_returns_false_when_already_verified() {
    let (auth, provider) = service();
    let (mut store, _) = store();
    store.set(Session::member("Ada", "ada@example.org", true));
    assert!(!auth.resend_verification_email(&store, Uuid::new_v4()).await.unwrap());
    assert!(provider.outbox().is_empty());
}

#[tokio::test]
async fn resend_sends_for_unverified_session() {
    let (auth, provider) = service();
    let (mut store, _) = store();
    store.set(Session::provisional("Ada", "ada@example.org"));
    assert!(auth.resend_verification_email(&store, Uuid::new_v4()).await.unwrap());
    assert_eq!(provider.outbox().len(), 1);
}

#[tokio::test]
async fn resend_without_session_fails() {
    let (auth, _) = service();
    let (store, _) = store();
    assert_eq!(
        auth.resend_verification_email(&store, Uuid::new_v4()).await.unwrap_err(),
        AuthError::NotSignedIn
    );
}

// =============================================================================
// Password reset
// =============================================================================

#[tokio::test]
async fn password_reset_validates_email() {
    let (auth, _) = service();
    assert!(auth.request_password_reset(Uuid::new_v4(), "ada@example.org").await.is_ok());
    assert!(matches!(
        auth.request_password_reset(Uuid::new_v4(), "nope").await,
        Err(AuthError::InvalidInput(_))
    ));
}

#[test]
fn user_messages_are_not_empty() {
    for err in [
        AuthError::InvalidInput("x"),
        AuthError::Busy,
        AuthError::NotSignedIn,
        AuthError::InvalidToken,
        AuthError::Provider("boom".into()),
    ] {
        assert!(!err.user_message().is_empty());
    }
}
