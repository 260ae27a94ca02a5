//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Server-rendered pages, the account form handlers, the admin shell and the
//! static assets share one Axum router. Every request passes the guard
//! middleware first, so handlers only ever run for visitors allowed to see
//! them.

pub mod admin;
pub mod auth;
pub mod cookies;
pub mod guard;
pub mod pages;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Router, middleware};
use axum_extra::extract::cookie::CookieJar;
use leptos::prelude::IntoView;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::view::{self, Chrome};
use self::guard::Viewer;

/// Build the site router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/events", get(pages::events))
        .route("/gallery", get(pages::gallery))
        .route("/contact", get(pages::contact))
        .route("/programs", get(pages::programs))
        .route("/programs/{slug}", get(pages::program))
        .route("/donate", get(pages::donate))
        .route("/volunteer", get(pages::volunteer))
        .route("/profile", get(pages::profile))
        .route("/verify-email", get(pages::verify_email))
        .route("/verify-email/check", post(auth::check_verification))
        .route("/verify-email/resend", post(auth::resend_verification))
        .route("/confirm-email/{token}", get(auth::confirm_email))
        .route("/login", get(pages::login).post(auth::login))
        .route("/signup", get(pages::signup).post(auth::signup))
        .route("/forgot-password", get(pages::forgot_password).post(auth::forgot_password))
        .route("/logout", post(auth::logout))
        .route("/admin", get(admin::dashboard))
        .route("/admin/{section}", get(admin::section))
        .route("/healthz", get(healthz))
        .nest_service("/assets", ServeDir::new(&state.config.assets_dir))
        .fallback(pages::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), guard::require_access))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Render `body` inside the site chrome, consuming pending toasts.
pub(crate) fn render_page(
    state: &AppState,
    viewer: &Viewer,
    jar: CookieJar,
    title: &str,
    body: impl IntoView + 'static,
) -> Response {
    let (jar, toasts) = cookies::take_flash(jar);
    let chrome = Chrome { site_name: state.config.site_name.clone(), viewer: viewer.session().cloned(), toasts };
    (jar, Html(view::render_document(chrome, title, body))).into_response()
}

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
