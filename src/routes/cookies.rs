//! Cookie plumbing for the web host.
//!
//! SYSTEM CONTEXT
//! ==============
//! Cookies stand in for the browser storage the site relies on: the session
//! record, the flash queue of pending toasts, the path to return to after
//! login, and a per-browser client id for the submission gate. Values are
//! hex-encoded so JSON never has to survive cookie syntax.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;
use uuid::Uuid;

use crate::notify::Notification;
use crate::session::SessionStorage;

pub const FLASH_COOKIE: &str = "flash";
pub const RETURN_TO_COOKIE: &str = "return_to";
pub const CLIENT_ID_COOKIE: &str = "client_id";

const SESSION_MAX_AGE_DAYS: i64 = 365;
const CLIENT_ID_MAX_AGE_DAYS: i64 = 365;
const RETURN_TO_MAX_AGE_MINUTES: i64 = 30;

pub(crate) fn encode(raw: &str) -> String {
    hex::encode(raw.as_bytes())
}

pub(crate) fn decode(value: &str) -> Option<String> {
    let bytes = hex::decode(value).ok()?;
    String::from_utf8(bytes).ok()
}

fn build(name: &str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name.to_owned(), value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

fn removal(name: &str) -> Cookie<'static> {
    Cookie::build((name.to_owned(), "")).path("/").build()
}

// =============================================================================
// SESSION STORAGE
// =============================================================================

/// `SessionStorage` over the request's cookie jar. Changes accumulate in the
/// jar and reach the browser when the jar is returned with a response.
#[derive(Debug)]
pub struct CookieStorage {
    jar: CookieJar,
    secure: bool,
}

impl CookieStorage {
    #[must_use]
    pub fn new(jar: CookieJar, secure: bool) -> Self {
        Self { jar, secure }
    }

    #[must_use]
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl SessionStorage for CookieStorage {
    /// Undecodable values are passed through raw so the store discards them.
    fn read(&self, key: &str) -> Option<String> {
        let value = self.jar.get(key)?.value();
        Some(decode(value).unwrap_or_else(|| value.to_owned()))
    }

    /// Persisted records outlive the browser session, like local storage.
    fn write(&mut self, key: &str, raw: &str) {
        let mut cookie = build(key, encode(raw), self.secure);
        cookie.set_max_age(Duration::days(SESSION_MAX_AGE_DAYS));
        let jar = std::mem::take(&mut self.jar);
        self.jar = jar.add(cookie);
    }

    fn remove(&mut self, key: &str) {
        let jar = std::mem::take(&mut self.jar);
        self.jar = jar.remove(removal(key));
    }
}

// =============================================================================
// FLASH
// =============================================================================

/// Notifications waiting to be shown.
#[must_use]
pub fn read_flash(jar: &CookieJar) -> Vec<Notification> {
    jar.get(FLASH_COOKIE)
        .and_then(|c| decode(c.value()))
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

/// Append `notifications` to the pending flash queue.
#[must_use]
pub fn push_flash(jar: CookieJar, notifications: Vec<Notification>, secure: bool) -> CookieJar {
    if notifications.is_empty() {
        return jar;
    }
    let mut pending = read_flash(&jar);
    pending.extend(notifications);
    match serde_json::to_string(&pending) {
        Ok(raw) => jar.add(build(FLASH_COOKIE, encode(&raw), secure)),
        Err(e) => {
            tracing::warn!(error = %e, "flash not stored");
            jar
        }
    }
}

/// Take the pending flash queue for rendering.
#[must_use]
pub fn take_flash(jar: CookieJar) -> (CookieJar, Vec<Notification>) {
    let pending = read_flash(&jar);
    if jar.get(FLASH_COOKIE).is_none() {
        return (jar, pending);
    }
    (jar.remove(removal(FLASH_COOKIE)), pending)
}

// =============================================================================
// RETURN-TO
// =============================================================================

#[must_use]
pub fn set_return_to(jar: CookieJar, path: &str, secure: bool) -> CookieJar {
    let mut cookie = build(RETURN_TO_COOKIE, encode(path), secure);
    cookie.set_max_age(Duration::minutes(RETURN_TO_MAX_AGE_MINUTES));
    jar.add(cookie)
}

#[must_use]
pub fn return_to(jar: &CookieJar) -> Option<String> {
    jar.get(RETURN_TO_COOKIE).and_then(|c| decode(c.value()))
}

#[must_use]
pub fn clear_return_to(jar: CookieJar) -> CookieJar {
    if jar.get(RETURN_TO_COOKIE).is_none() {
        return jar;
    }
    jar.remove(removal(RETURN_TO_COOKIE))
}

// =============================================================================
// CLIENT ID
// =============================================================================

/// The browser's client id, minting and storing one on first contact.
#[must_use]
pub fn client_id(jar: CookieJar, secure: bool) -> (CookieJar, Uuid) {
    if let Some(id) = jar
        .get(CLIENT_ID_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok())
    {
        return (jar, id);
    }
    let id = Uuid::new_v4();
    let mut cookie = build(CLIENT_ID_COOKIE, id.to_string(), secure);
    cookie.set_max_age(Duration::days(CLIENT_ID_MAX_AGE_DAYS));
    (jar.add(cookie), id)
}

#[cfg(test)]
#[path = "cookies_test.rs"]
mod tests;
