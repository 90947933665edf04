use thiserror::Error;
use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;
use crate::shared::errors::{StoreError, ValidationErrors};

/// 핸들러 에러 응답 타입
/// Error response shape returned by handlers and extractors
pub type ApiError = (StatusCode, Json<serde_json::Value>);

/// 인증 관련 에러
/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// 입력값 검증 실패 (필드별 메시지)
    /// Input validation failed (per-field messages)
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// 잘못된 이메일 또는 비밀번호 (비활성 계정 포함)
    /// Invalid email or password; also used for inactive accounts
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// 인증 정보가 없거나 유효하지 않음
    /// Bearer credentials missing or not valid
    #[error("Authentication credentials were not provided or are invalid")]
    NotAuthenticated,

    /// 잘못된, 만료된 또는 무효화된 토큰
    /// Malformed, expired or revoked token
    #[error("Invalid token")]
    InvalidToken,

    /// 사용자를 찾을 수 없음
    /// User not found
    #[error("User not found: id={id}")]
    UserNotFound { id: u64 },

    /// 비밀번호 해싱 실패
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    PasswordHashingFailed(String),

    /// 데이터베이스 에러
    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 내부 서버 에러
    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail { .. } => AuthError::Validation(ValidationErrors::single(
                "email",
                "user with this email already exists.",
            )),
            StoreError::UserNotFound { id } => AuthError::UserNotFound { id },
            StoreError::Backend(e) => AuthError::DatabaseError(format!("{:#}", e)),
        }
    }
}

/// AuthError를 HTTP 응답으로 변환
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let status = match &err {
            AuthError::Validation(errors) => {
                let body = serde_json::to_value(errors)
                    .unwrap_or_else(|_| json!({ "error": err.to_string() }));
                return (StatusCode::BAD_REQUEST, Json(body));
            }
            AuthError::InvalidToken => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            AuthError::UserNotFound { .. } => StatusCode::NOT_FOUND,
            AuthError::PasswordHashingFailed(_)
            | AuthError::DatabaseError(_)
            | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": err.to_string() })))
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let api_error: ApiError = self.into();
        api_error.into_response()
    }
}
