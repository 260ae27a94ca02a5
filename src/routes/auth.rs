//! Form handlers for the account flows.
//!
//! Every handler follows the same shape: read the client id, restore the
//! session store over the cookie jar, call `AuthService`, queue one toast and
//! answer with `303 See Other`. Failures never surface as error statuses; the
//! visitor lands back on the form with an error toast instead.

use axum::extract::{Form, Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use uuid::Uuid;

use super::cookies::{self, CookieStorage};
use crate::auth::AuthError;
use crate::guard::{self, FORGOT_PASSWORD_PATH, HOME_PATH, LOGIN_PATH, SIGNUP_PATH};
use crate::notify::{FlashQueue, Notification, Notifier};
use crate::session::SessionStore;
use crate::state::AppState;

pub const VERIFY_EMAIL_PATH: &str = "/verify-email";
const ADMIN_HOME: &str = "/admin";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetForm {
    #[serde(default)]
    pub email: String,
}

/// Per-request context: the restored store plus the toast queue, seeded with
/// whatever the previous response left unshown.
struct Flow {
    store: SessionStore<CookieStorage>,
    client_id: Uuid,
    queue: FlashQueue,
    secure: bool,
}

impl Flow {
    fn begin(state: &AppState, jar: CookieJar) -> Self {
        let secure = state.config.cookie_secure;
        let (jar, client_id) = cookies::client_id(jar, secure);
        let (jar, carried) = cookies::take_flash(jar);
        Self {
            store: SessionStore::restored(CookieStorage::new(jar, secure)),
            client_id,
            queue: FlashQueue::from_pending(carried),
            secure,
        }
    }

    fn fail(&self, error: &AuthError) {
        if matches!(error, AuthError::Provider(_)) {
            tracing::warn!(error = %error, "auth provider call failed");
        }
        self.queue.notify(Notification::error(error.user_message()));
    }

    fn finish_with_jar(self, f: impl FnOnce(CookieJar) -> CookieJar, target: &str) -> Response {
        let jar = cookies::push_flash(self.store.into_storage().into_jar(), self.queue.drain(), self.secure);
        (f(jar), Redirect::to(target)).into_response()
    }

    fn finish(self, target: &str) -> Response {
        self.finish_with_jar(|jar| jar, target)
    }
}

pub async fn login(State(state): State<AppState>, jar: CookieJar, Form(form): Form<LoginForm>) -> Response {
    let return_to = cookies::return_to(&jar);
    let mut flow = Flow::begin(&state, jar);
    match state.auth.login(&mut flow.store, flow.client_id, &form.email, &form.password).await {
        Ok(session) => {
            flow.queue.notify(Notification::success(format!("Welcome back, {}!", session.name)));
            let target = return_to
                .and_then(|raw| guard::safe_return_path(&raw).map(str::to_owned))
                .unwrap_or_else(|| (if session.is_admin { ADMIN_HOME } else { HOME_PATH }).to_owned());
            flow.finish_with_jar(cookies::clear_return_to, &target)
        }
        Err(e) => {
            flow.fail(&e);
            flow.finish(LOGIN_PATH)
        }
    }
}

pub async fn signup(State(state): State<AppState>, jar: CookieJar, Form(form): Form<SignupForm>) -> Response {
    let mut flow = Flow::begin(&state, jar);
    match state
        .auth
        .signup(&mut flow.store, flow.client_id, &form.name, &form.email, &form.password)
        .await
    {
        Ok(session) => {
            flow.queue.notify(Notification::success(format!(
                "Welcome, {}! We sent a confirmation link to {}.",
                session.name, session.email
            )));
            flow.finish(VERIFY_EMAIL_PATH)
        }
        Err(e) => {
            flow.fail(&e);
            flow.finish(SIGNUP_PATH)
        }
    }
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let mut flow = Flow::begin(&state, jar);
    let had_session = flow.store.current().is_some();
    match state.auth.logout(&mut flow.store, flow.client_id).await {
        Ok(()) if had_session => flow.queue.notify(Notification::info("You have been logged out.")),
        Ok(()) => {}
        Err(e) => flow.fail(&e),
    }
    flow.finish(HOME_PATH)
}

pub async fn forgot_password(State(state): State<AppState>, jar: CookieJar, Form(form): Form<ResetForm>) -> Response {
    let flow = Flow::begin(&state, jar);
    match state.auth.request_password_reset(flow.client_id, &form.email).await {
        Ok(()) => {
            flow.queue.notify(Notification::info(
                "If an account exists for that address, reset instructions are on their way.",
            ));
            flow.finish(LOGIN_PATH)
        }
        Err(e) => {
            flow.fail(&e);
            flow.finish(FORGOT_PASSWORD_PATH)
        }
    }
}

pub async fn check_verification(State(state): State<AppState>, jar: CookieJar) -> Response {
    let mut flow = Flow::begin(&state, jar);
    match state.auth.check_verification(&mut flow.store, flow.client_id).await {
        Ok(true) => flow.queue.notify(Notification::success("Your email address is verified.")),
        Ok(false) => flow
            .queue
            .notify(Notification::warning("Your email address is not verified yet. Check your inbox.")),
        Err(e) => flow.fail(&e),
    }
    flow.finish(VERIFY_EMAIL_PATH)
}

pub async fn resend_verification(State(state): State<AppState>, jar: CookieJar) -> Response {
    let flow = Flow::begin(&state, jar);
    match state.auth.resend_verification_email(&flow.store, flow.client_id).await {
        Ok(true) => flow.queue.notify(Notification::success("Verification email sent.")),
        Ok(false) => flow.queue.notify(Notification::info("Your email address is already verified.")),
        Err(e) => flow.fail(&e),
    }
    flow.finish(VERIFY_EMAIL_PATH)
}

pub async fn confirm_email(State(state): State<AppState>, jar: CookieJar, Path(token): Path<String>) -> Response {
    let mut flow = Flow::begin(&state, jar);
    match state.auth.confirm_email(&mut flow.store, flow.client_id, &token).await {
        Ok(_) => {
            flow.queue.notify(Notification::success("Thanks! Your email address is confirmed."));
            let target = if flow.store.current().is_some() { VERIFY_EMAIL_PATH } else { LOGIN_PATH };
            flow.finish(target)
        }
        Err(e) => {
            flow.fail(&e);
            flow.finish(HOME_PATH)
        }
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
