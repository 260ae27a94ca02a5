//! Guard middleware: restores the visitor's session and applies the route
//! guard's decision before any page handler runs.
//!
//! SYSTEM CONTEXT
//! ==============
//! `guard::decide` only decides. This layer performs the side effects: a
//! `303 See Other` to the target, one flash notification, and the return path
//! for login redirects. Allowed requests carry the session to handlers as a
//! `Viewer` extension.

use axum::extract::{Request, State};
use axum::http::header::{RETRY_AFTER, SET_COOKIE};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use super::cookies::{self, CookieStorage};
use crate::guard::{self, Decision};
use crate::notify::{FlashQueue, Notifier};
use crate::session::storage::SESSION_KEY;
use crate::session::{Session, SessionStore};
use crate::state::AppState;

/// Session of the visitor making the request, if any.
#[derive(Clone, Debug, Default)]
pub struct Viewer(pub Option<Session>);

impl Viewer {
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.0.as_ref()
    }
}

pub async fn require_access(State(state): State<AppState>, jar: CookieJar, mut request: Request, next: Next) -> Response {
    let secure = state.config.cookie_secure;
    let path = request.uri().path().to_owned();

    let store = SessionStore::restored(CookieStorage::new(jar, secure));
    let decision = guard::decide(&path, store.current(), store.is_loading());
    let session = store.current().cloned();
    let jar = store.into_storage().into_jar();

    match decision {
        Decision::Allow => {
            request.extensions_mut().insert(Viewer(session));
            let response = next.run(request).await;
            if sets_cookie(&response, SESSION_KEY) {
                // The handler rewrote the session; its cookie is authoritative.
                return response;
            }
            (jar, response).into_response()
        }
        Decision::Defer => (jar, deferred()).into_response(),
        Decision::Redirect(redirect) => {
            tracing::debug!(%path, target = redirect.target, "guard redirect");
            let queue = FlashQueue::new();
            queue.notify(redirect.notice);
            let mut jar = cookies::push_flash(jar, queue.drain(), secure);
            if let Some(return_to) = redirect.return_to {
                if request.method() == Method::GET {
                    let full = request
                        .uri()
                        .path_and_query()
                        .map_or(return_to, |pq| pq.as_str().to_owned());
                    jar = cookies::set_return_to(jar, &full, secure);
                }
            }
            (jar, Redirect::to(redirect.target)).into_response()
        }
    }
}

fn sets_cookie(response: &Response, name: &str) -> bool {
    let prefix = format!("{name}=");
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with(&prefix))
}

/// The session is still loading; ask the browser to come back shortly.
fn deferred() -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, [(RETRY_AFTER, HeaderValue::from_static("1"))]).into_response()
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
