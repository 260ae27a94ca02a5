use axum::http::HeaderMap;
use axum::http::header::COOKIE;

use super::*;
use crate::session::storage::SESSION_KEY;
use crate::session::{Session, SessionStore};

fn jar_with(cookie: &str) -> CookieJar {
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, cookie.parse().unwrap());
    CookieJar::from_headers(&headers)
}

// =============================================================================
// encode / decode
// =============================================================================

#[test]
fn encode_decode_round_trip_with_cookie_hostile_chars() {
    let raw = r#"{"name":"Ada, \"the\" first; ok"}"#;
    let encoded = encode(raw);
    assert!(encoded.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(decode(&encoded).as_deref(), Some(raw));
}

#[test]
fn decode_rejects_non_hex() {
    assert_eq!(decode("zz"), None);
}

// =============================================================================
// CookieStorage
// =============================================================================

#[test]
fn cookie_storage_round_trips_session() {
    let session = Session::member("Ada Lovelace", "ada@example.org", true);
    let mut store = SessionStore::restored(CookieStorage::new(CookieJar::new(), false));
    store.set(session.clone());
    let jar = store.into_storage().into_jar();

    let value = jar.get(SESSION_KEY).unwrap().value().to_owned();
    let reloaded = SessionStore::restored(CookieStorage::new(jar_with(&format!("session={value}")), false));
    assert_eq!(reloaded.current(), Some(&session));
}

#[test]
fn cookie_storage_writes_long_lived_cookie() {
    let mut storage = CookieStorage::new(CookieJar::new(), false);
    storage.write(SESSION_KEY, "{}");
    let jar = storage.into_jar();
    let cookie = jar.get(SESSION_KEY).unwrap();
    assert_eq!(cookie.max_age(), Some(Duration::days(SESSION_MAX_AGE_DAYS)));
    assert_eq!(cookie.http_only(), Some(true));
}

#[test]
fn cookie_storage_discards_garbage() {
    let store = SessionStore::restored(CookieStorage::new(jar_with("session=not-hex"), false));
    assert!(store.current().is_none());
    let jar = store.into_storage().into_jar();
    assert!(jar.get(SESSION_KEY).is_none());
}

#[test]
fn cookie_storage_discards_hex_of_invalid_json() {
    let cookie = format!("session={}", encode("{oops"));
    let store = SessionStore::restored(CookieStorage::new(jar_with(&cookie), false));
    assert!(store.current().is_none());
}

// =============================================================================
// Flash
// =============================================================================

#[test]
fn flash_push_then_take() {
    let jar = push_flash(CookieJar::new(), vec![Notification::info("one")], false);
    let jar = push_flash(jar, vec![Notification::error("two")], false);
    let (jar, pending) = take_flash(jar);
    assert_eq!(pending, vec![Notification::info("one"), Notification::error("two")]);
    assert!(read_flash(&jar).is_empty());
}

#[test]
fn push_empty_flash_leaves_jar_untouched() {
    let jar = push_flash(CookieJar::new(), Vec::new(), false);
    assert!(jar.get(FLASH_COOKIE).is_none());
}

#[test]
fn take_flash_from_request_cookie() {
    let raw = serde_json::to_string(&vec![Notification::success("saved")]).unwrap();
    let jar = jar_with(&format!("flash={}", encode(&raw)));
    let (_, pending) = take_flash(jar);
    assert_eq!(pending, vec![Notification::success("saved")]);
}

#[test]
fn malformed_flash_reads_as_empty() {
    assert!(read_flash(&jar_with("flash=xyz")).is_empty());
}

// =============================================================================
// Return-to and client id
// =============================================================================

#[test]
fn return_to_round_trip_and_clear() {
    let jar = set_return_to(CookieJar::new(), "/programs?tab=1", false);
    assert_eq!(return_to(&jar).as_deref(), Some("/programs?tab=1"));
    let jar = clear_return_to(jar);
    assert_eq!(return_to(&jar), None);
}

#[test]
fn client_id_is_minted_once() {
    let (jar, first) = client_id(CookieJar::new(), false);
    let (_, second) = client_id(jar, false);
    assert_eq!(first, second);
}

#[test]
fn client_id_reads_existing_cookie() {
    let id = Uuid::new_v4();
    let (_, read) = client_id(jar_with(&format!("client_id={id}")), false);
    assert_eq!(read, id);
}

#[test]
fn invalid_client_id_is_replaced() {
    let (jar, id) = client_id(jar_with("client_id=garbage"), false);
    assert_eq!(jar.get(CLIENT_ID_COOKIE).unwrap().value(), id.to_string());
}
