//! Request/response helpers shared by the route tests.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Method, Request, Response};
use tower::ServiceExt;

use super::app;
use super::cookies::{decode, encode};
use crate::notify::Notification;
use crate::session::Session;
use crate::state::test_helpers::test_app_state;

pub fn test_app() -> Router {
    app(test_app_state())
}

pub fn session_cookie(session: &Session) -> String {
    let raw = serde_json::to_string(session).unwrap();
    format!("session={}", encode(&raw))
}

pub fn return_to_cookie(path: &str) -> String {
    format!("return_to={}", encode(path))
}

pub fn get(path: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_form(path: &str, form: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::from(form.to_owned())).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response.headers().get(LOCATION).and_then(|v| v.to_str().ok())
}

pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(str::to_owned))
        .collect()
}

/// Value the response sets for cookie `name`. An empty string means removal.
pub fn cookie_value(response: &Response<Body>, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    set_cookies(response).into_iter().find_map(|header| {
        let pair = header.split(';').next()?;
        pair.strip_prefix(&prefix).map(str::to_owned)
    })
}

/// `name=value` pairs of every non-empty cookie the response sets, joined for
/// a follow-up request. Pending toasts are left out.
pub fn cookie_header(response: &Response<Body>) -> String {
    set_cookies(response)
        .iter()
        .filter_map(|header| header.split(';').next())
        .filter(|pair| !pair.ends_with('=') && !pair.starts_with("flash="))
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn session_from(response: &Response<Body>) -> Option<Session> {
    let value = cookie_value(response, "session")?;
    serde_json::from_str(&decode(&value)?).ok()
}

pub fn flash_from(response: &Response<Body>) -> Vec<Notification> {
    cookie_value(response, "flash")
        .and_then(|value| decode(&value))
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
