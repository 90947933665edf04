// =====================================================
// 통합 테스트 공통 헬퍼
// =====================================================
// 목적: 메모리 저장소로 전체 라우터를 구성하고 HTTP 요청을 보내는 헬퍼 제공
//
// 사용법:
// ```rust
// mod common;
// use common::*;
//
// #[tokio::test]
// async fn test_something() {
//     let app = TestApp::new();
//     let session = app.register_ok("user@example.com").await;
//     // 테스트 코드...
// }
// ```
// =====================================================
#![allow(dead_code)]

use std::sync::Arc;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use auth_api::domains::auth::models::{RefreshToken, RefreshTokenCreate};
use auth_api::shared::database::{InMemoryTokenStore, InMemoryUserStore, TokenStore, UserStore};
use auth_api::shared::errors::StoreError;
use auth_api::{create_app, AppConfig, AppState};

// 테스트용 상수
pub const TEST_PASSWORD: &str = "s3cure-passw0rd";
pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_config() -> AppConfig {
    AppConfig {
        jwt_secret: TEST_SECRET.to_string(),
        ..AppConfig::default()
    }
}

/// 등록된 사용자 세션
pub struct Session {
    pub user_id: u64,
    pub email: String,
    pub access: String,
    pub refresh: String,
}

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    pub users: Arc<InMemoryUserStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self::with_token_store(config, Arc::new(InMemoryTokenStore::new()))
    }

    pub fn with_token_store(config: AppConfig, tokens: Arc<dyn TokenStore>) -> Self {
        let users = Arc::new(InMemoryUserStore::new());
        let state = AppState::with_stores(config, users.clone() as Arc<dyn UserStore>, tokens);
        let router = create_app(state.clone());

        Self { state, router, users }
    }

    /// 요청 전송 후 (상태 코드, JSON 본문) 반환. 빈 본문은 Value::Null
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        bearer: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, value)
    }

    /// 임의의 본문 / Content-Type 으로 요청 전송
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        bearer: Option<&str>,
        content_type: Option<&str>,
        body: &str,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    pub async fn post(&self, uri: &str, bearer: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, bearer, Some(body)).await
    }

    pub async fn get(&self, uri: &str, bearer: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, bearer, None).await
    }

    pub async fn register(&self, email: &str) -> (StatusCode, Value) {
        self.post("/register/", None, json!({ "email": email, "password": TEST_PASSWORD }))
            .await
    }

    /// 회원가입 후 세션 반환 (201 이 아니면 panic)
    pub async fn register_ok(&self, email: &str) -> Session {
        let (status, body) = self.register(email).await;
        assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");
        session_from(&body)
    }

    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.post("/login/", None, json!({ "email": email, "password": password }))
            .await
    }

    pub async fn logout(&self, access: &str, refresh: Option<&str>) -> (StatusCode, Value) {
        let body = match refresh {
            Some(refresh) => json!({ "refresh": refresh }),
            None => json!({}),
        };
        self.post("/logout/", Some(access), body).await
    }
}

pub fn session_from(body: &Value) -> Session {
    Session {
        user_id: body["user"]["id"].as_u64().expect("user.id"),
        email: body["user"]["email"].as_str().expect("user.email").to_string(),
        access: body["access"].as_str().expect("access").to_string(),
        refresh: body["refresh"].as_str().expect("refresh").to_string(),
    }
}

/// 블랙리스트 등록이 항상 실패하는 저장소 (DB 장애 흉내)
/// Token store whose revocation always fails, as if the database were down
pub struct FailingRevokeStore {
    inner: InMemoryTokenStore,
}

impl FailingRevokeStore {
    pub fn new() -> Self {
        Self { inner: InMemoryTokenStore::new() }
    }
}

#[async_trait]
impl TokenStore for FailingRevokeStore {
    async fn record_issued(&self, token: RefreshTokenCreate) -> Result<RefreshToken, StoreError> {
        self.inner.record_issued(token).await
    }

    async fn revoke(&self, _token: RefreshTokenCreate) -> Result<bool, StoreError> {
        Err(StoreError::Backend(anyhow::anyhow!("connection refused")))
    }

    async fn is_revoked(&self, jti: Uuid) -> Result<bool, StoreError> {
        self.inner.is_revoked(jti).await
    }

    async fn revoke_all_for_user(&self, user_id: u64) -> Result<u64, StoreError> {
        self.inner.revoke_all_for_user(user_id).await
    }

    async fn delete_expired(&self) -> Result<u64, StoreError> {
        self.inner.delete_expired().await
    }
}
