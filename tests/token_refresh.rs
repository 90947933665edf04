// =====================================================
// Access Token 갱신 통합 테스트
// =====================================================
mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

#[tokio::test]
async fn refresh_mints_new_access_token() {
    let app = TestApp::new();
    let session = app.register_ok("alice@example.com").await;

    let (status, body) = app
        .post("/token/refresh/", None, json!({ "refresh": session.refresh }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let access = body["access"].as_str().unwrap();
    assert_ne!(access, session.access);
    // rotation off: the same refresh token comes back
    assert_eq!(body["refresh"], session.refresh.as_str());

    let (status, profile) = app.get("/profile/", Some(access)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["id"].as_u64(), Some(session.user_id));
}

#[tokio::test]
async fn invalid_refresh_tokens_are_unauthorized() {
    let app = TestApp::new();
    let session = app.register_ok("bob@example.com").await;

    for token in ["garbage", session.access.as_str()] {
        let (status, body) = app
            .post("/token/refresh/", None, json!({ "refresh": token }))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Token is invalid or expired");
    }
}

#[tokio::test]
async fn missing_refresh_field_is_bad_request() {
    let app = TestApp::new();

    let (status, body) = app.post("/token/refresh/", None, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["refresh"].is_array());
}

#[tokio::test]
async fn refresh_is_refused_for_deactivated_user() {
    let app = TestApp::new();
    let session = app.register_ok("carol@example.com").await;
    app.state
        .auth_state
        .auth_service
        .set_active(session.user_id, false)
        .await
        .unwrap();

    let (status, _) = app
        .post("/token/refresh/", None, json!({ "refresh": session.refresh }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn rotation_retires_the_presented_token() {
    let app = TestApp::with_config(auth_api::AppConfig {
        rotate_refresh_tokens: true,
        ..test_config()
    });
    let session = app.register_ok("dave@example.com").await;

    let (status, body) = app
        .post("/token/refresh/", None, json!({ "refresh": session.refresh }))
        .await;
    assert_eq!(status, StatusCode::OK);
    let rotated = body["refresh"].as_str().unwrap().to_string();
    assert_ne!(rotated, session.refresh);

    // 이전 토큰은 더 이상 사용 불가
    let (status, _) = app
        .post("/token/refresh/", None, json!({ "refresh": session.refresh }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .post("/token/refresh/", None, json!({ "refresh": rotated }))
        .await;
    assert_eq!(status, StatusCode::OK);
}
