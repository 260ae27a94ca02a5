use axum::http::StatusCode;

use super::cookies::encode;
use super::test_support::{body_text, cookie_value, get, send, session_cookie, test_app};
use crate::notify::Notification;
use crate::session::Session;

#[tokio::test]
async fn healthz_ok() {
    let response = send(test_app(), get("/healthz", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn public_pages_render_for_guests() {
    for path in ["/", "/about", "/events", "/gallery", "/contact", "/login", "/signup", "/forgot-password"] {
        let response = send(test_app(), get(path, None)).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn unknown_path_is_not_found_page() {
    let response = send(test_app(), get("/nowhere", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Page not found"));
}

#[tokio::test]
async fn pending_toasts_render_once() {
    let raw = serde_json::to_string(&vec![Notification::warning("Heads up")]).unwrap();
    let cookie = format!("flash={}", encode(&raw));
    let response = send(test_app(), get("/", Some(&cookie))).await;
    assert_eq!(cookie_value(&response, "flash").as_deref(), Some(""));
    let html = body_text(response).await;
    assert!(html.contains("toast--warning"));
    assert!(html.contains("Heads up"));
}

#[tokio::test]
async fn login_page_notes_existing_session() {
    let member = Session::member("Ada", "ada@example.org", true);
    let html = body_text(send(test_app(), get("/login", Some(&session_cookie(&member)))).await).await;
    assert!(html.contains("already signed in as ada@example.org"));
}

#[tokio::test]
async fn registered_member_sees_program_detail() {
    let member = Session::member("Ada", "ada@example.org", true);
    let cookie = session_cookie(&member);
    let response = send(test_app(), get("/programs/clean-water", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Clean Water"));

    let missing = send(test_app(), get("/programs/space-travel", Some(&cookie))).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unverified_member_sees_nudge_and_dev_link_hint() {
    let member = Session::member("Ada", "ada@example.org", false);
    let html = body_text(send(test_app(), get("/verify-email", Some(&session_cookie(&member)))).await).await;
    assert!(html.contains("Verify now"));
    assert!(html.contains(r#"action="/verify-email/check""#));
}

#[tokio::test]
async fn profile_shows_account_flags() {
    let admin = Session::admin("Grace", "grace@example.org");
    let html = body_text(send(test_app(), get("/profile", Some(&session_cookie(&admin)))).await).await;
    assert!(html.contains("Administrator"));
    assert!(html.contains("grace@example.org"));
}
