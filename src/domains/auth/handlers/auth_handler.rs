use crate::domains::auth::models::{
    AuthResponse, LoginRequest, LogoutRequest, MessageResponse, RegisterRequest,
    TokenRefreshRequest, TokenRefreshResponse,
};
use crate::shared::services::AppState;
use crate::shared::errors::{ApiError, AuthError, ValidationErrors};
use crate::shared::middleware::{AuthenticatedUser, ValidatedJson};
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

// 회원가입 핸들러
#[utoipa::path(
    post,
    path = "/register/",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = AuthResponse),
        (status = 400, description = "Field validation errors (including duplicate email)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(app_state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    // Service 호출 (검증 + 사용자 생성 + 토큰 발급)
    let (user, tokens) = app_state
        .auth_state
        .auth_service
        .register(request)
        .await
        .map_err(|e: AuthError| -> ApiError { e.into() })?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user.into(),
            access: tokens.access,
            refresh: tokens.refresh,
            message: "Registration successful".to_string(),
        }),
    ))
}

// 로그인 핸들러
#[utoipa::path(
    post,
    path = "/login/",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid email or password", body = crate::domains::auth::models::ErrorResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(app_state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (user, tokens) = app_state
        .auth_state
        .auth_service
        .login(request)
        .await
        .map_err(|e: AuthError| -> ApiError { e.into() })?;

    Ok(Json(AuthResponse {
        user: user.into(),
        access: tokens.access,
        refresh: tokens.refresh,
        message: "Login successful".to_string(),
    }))
}

/// 로그아웃 핸들러
/// Logout handler.
///
/// 존재하지만 유효하지 않은 Refresh Token 만 400 을 반환함.
/// Any other failure while blacklisting (e.g. the store is down) is logged and
/// still reported as a successful logout.
#[utoipa::path(
    post,
    path = "/logout/",
    request_body = LogoutRequest,
    responses(
        (status = 205, description = "Logout successful", body = MessageResponse),
        (status = 400, description = "Refresh token present but invalid", body = crate::domains::auth::models::ErrorResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("BearerAuth" = [])
    ),
    tag = "Auth"
)]
pub async fn logout(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    body: Option<Json<LogoutRequest>>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let invalid_token = || -> ApiError {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": AuthError::InvalidToken.to_string() })),
        )
    };

    let refresh_token = presented_refresh_token(body.and_then(|Json(request)| request.refresh))
        .map_err(|_| invalid_token())?;

    let result = app_state
        .auth_state
        .auth_service
        .logout(refresh_token.as_deref())
        .await;

    match result {
        Ok(()) => {}
        Err(AuthError::InvalidToken) => return Err(invalid_token()),
        Err(e) => {
            tracing::warn!(
                user_id = authenticated_user.user_id(),
                error = %e,
                "Refresh token blacklisting failed; reporting logout as successful"
            );
        }
    }

    Ok((
        StatusCode::RESET_CONTENT,
        Json(MessageResponse {
            message: "Logout successful".to_string(),
        }),
    ))
}

/// 토큰 갱신 핸들러
/// Refresh token handler
#[utoipa::path(
    post,
    path = "/token/refresh/",
    request_body = TokenRefreshRequest,
    responses(
        (status = 200, description = "Token refreshed successfully", body = TokenRefreshResponse),
        (status = 400, description = "Missing refresh token"),
        (status = 401, description = "Invalid, expired or revoked refresh token", body = crate::domains::auth::models::ErrorResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn refresh_token(
    State(app_state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TokenRefreshRequest>,
) -> Result<Json<TokenRefreshResponse>, ApiError> {
    let Some(refresh) = request.refresh.filter(|t| !t.trim().is_empty()) else {
        return Err(AuthError::Validation(ValidationErrors::single(
            "refresh",
            "This field is required.",
        ))
        .into());
    };

    let tokens = app_state
        .auth_state
        .auth_service
        .refresh_session(&refresh)
        .await
        .map_err(|e| -> ApiError {
            match e {
                // 갱신 실패는 인증 실패(401)로 응답
                AuthError::InvalidToken => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "Token is invalid or expired" })),
                ),
                other => other.into(),
            }
        })?;

    Ok(Json(TokenRefreshResponse {
        access: tokens.access,
        refresh: tokens.refresh,
    }))
}

// 빈 값(null, "", [], {}, 0, false)은 토큰 없음, 문자열이 아닌 값은 잘못된 토큰
fn presented_refresh_token(value: Option<Value>) -> Result<Option<String>, AuthError> {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::String(token)) if token.is_empty() => Ok(None),
        Some(Value::String(token)) => Ok(Some(token)),
        Some(Value::Array(items)) if items.is_empty() => Ok(None),
        Some(Value::Object(fields)) if fields.is_empty() => Ok(None),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(None),
        Some(_) => Err(AuthError::InvalidToken),
    }
}
