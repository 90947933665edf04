// =====================================================
// 프로필 조회 / 수정 통합 테스트
// =====================================================
mod common;

use axum::http::{Method, StatusCode};
use common::*;
use serde_json::json;

#[tokio::test]
async fn profile_returns_only_the_callers_record() {
    let app = TestApp::new();
    let alice = app.register_ok("alice@example.com").await;
    let bob = app.register_ok("bob@example.com").await;

    let (status, body) = app.get("/profile/", Some(&alice.access)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"].as_u64(), Some(alice.user_id));
    assert_eq!(body["email"], "alice@example.com");

    // 쿼리 파라미터로 다른 사용자를 선택할 수 없음
    let uri = format!("/profile/?id={}&email=bob@example.com", bob.user_id);
    let (status, body) = app.get(&uri, Some(&alice.access)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"].as_u64(), Some(alice.user_id));
    assert_ne!(body["email"], bob.email.as_str());
}

#[tokio::test]
async fn updates_never_touch_other_users() {
    let app = TestApp::new();
    let alice = app.register_ok("alice@example.com").await;
    let bob = app.register_ok("bob@example.com").await;

    let (status, body) = app
        .request(
            Method::PATCH,
            &format!("/profile/?id={}", bob.user_id),
            Some(&alice.access),
            Some(json!({ "first_name": "Mallory" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"].as_u64(), Some(alice.user_id));

    let (_, bob_profile) = app.get("/profile/", Some(&bob.access)).await;
    assert!(bob_profile["first_name"].is_null());
}

#[tokio::test]
async fn patch_changes_only_supplied_fields() {
    let app = TestApp::new();
    let session = app.register_ok("carol@example.com").await;

    let (status, _) = app
        .request(
            Method::PUT,
            "/profile/",
            Some(&session.access),
            Some(json!({ "username": "carol", "first_name": "Carol", "last_name": "Smith" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request(
            Method::PATCH,
            "/profile/",
            Some(&session.access),
            Some(json!({ "last_name": "Jones" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "carol");
    assert_eq!(body["first_name"], "Carol");
    assert_eq!(body["last_name"], "Jones");

    // explicit null clears
    let (_, body) = app
        .request(
            Method::PATCH,
            "/profile/",
            Some(&session.access),
            Some(json!({ "first_name": null })),
        )
        .await;
    assert!(body["first_name"].is_null());
    assert_eq!(body["username"], "carol");
}

#[tokio::test]
async fn put_clears_omitted_fields() {
    let app = TestApp::new();
    let session = app.register_ok("dave@example.com").await;

    app.request(
        Method::PUT,
        "/profile/",
        Some(&session.access),
        Some(json!({ "username": "dave", "first_name": "Dave", "last_name": "Brown" })),
    )
    .await;

    let (status, body) = app
        .request(
            Method::PUT,
            "/profile/",
            Some(&session.access),
            Some(json!({ "first_name": "David" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "David");
    assert!(body["username"].is_null());
    assert!(body["last_name"].is_null());
}

#[tokio::test]
async fn email_is_read_only() {
    let app = TestApp::new();
    let session = app.register_ok("erin@example.com").await;

    let (status, body) = app
        .request(
            Method::PATCH,
            "/profile/",
            Some(&session.access),
            Some(json!({ "email": "hijack@example.com", "first_name": "Erin" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "erin@example.com");
    assert_eq!(body["first_name"], "Erin");

    // 기존 이메일로 계속 로그인 가능
    let (status, _) = app.login("erin@example.com", TEST_PASSWORD).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn invalid_username_is_rejected_and_nothing_changes() {
    let app = TestApp::new();
    let session = app.register_ok("frank@example.com").await;

    let (status, body) = app
        .request(
            Method::PATCH,
            "/profile/",
            Some(&session.access),
            Some(json!({ "username": "not valid!", "first_name": "Frank" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["username"].is_array());

    let (_, profile) = app.get("/profile/", Some(&session.access)).await;
    assert!(profile["first_name"].is_null());
    assert!(profile["username"].is_null());
}

#[tokio::test]
async fn malformed_update_bodies_are_field_errors() {
    let app = TestApp::new();
    let session = app.register_ok("jack@example.com").await;

    let (status, body) = app
        .request(
            Method::PATCH,
            "/profile/",
            Some(&session.access),
            Some(json!({ "username": 5, "first_name": "Jack" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["username"].is_array());
    assert!(body.get("first_name").is_none());

    let (status, body) = app
        .send_raw(
            Method::PUT,
            "/profile/",
            Some(&session.access),
            Some("application/json"),
            "{not json",
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["non_field_errors"].is_array());

    // nothing was written
    let (_, profile) = app.get("/profile/", Some(&session.access)).await;
    assert!(profile["first_name"].is_null());
}

#[tokio::test]
async fn profile_requires_valid_access_token() {
    let app = TestApp::new();
    let session = app.register_ok("gina@example.com").await;

    let (status, body) = app.get("/profile/", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = app.get("/profile/", Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // refresh token 은 bearer 로 사용할 수 없음
    let (status, _) = app.get("/profile/", Some(&session.refresh)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .request(Method::PATCH, "/profile/", None, Some(json!({ "first_name": "X" })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_access_token_is_rejected() {
    let app = TestApp::with_config(auth_api::AppConfig {
        access_token_ttl: chrono::Duration::seconds(-1),
        ..test_config()
    });
    let session = app.register_ok("henry@example.com").await;

    let (status, _) = app.get("/profile/", Some(&session.access)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn deactivated_user_loses_access() {
    let app = TestApp::new();
    let session = app.register_ok("ivy@example.com").await;
    app.state
        .auth_state
        .auth_service
        .set_active(session.user_id, false)
        .await
        .unwrap();

    let (status, _) = app.get("/profile/", Some(&session.access)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
