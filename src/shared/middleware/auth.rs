use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use crate::domains::auth::models::User;
use crate::shared::services::AppState;
use crate::shared::errors::{ApiError, AuthError};

/// 인증된 사용자 정보 (JWT 토큰에서 추출 + 저장소 조회)
/// Authenticated caller: a valid access token belonging to an existing, active user
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> u64 {
        self.user.id
    }
}

/// AuthenticatedUser를 Axum Extractor로 구현
///
/// 사용법:
/// ```rust,ignore
/// pub async fn get_profile(
///     State(app_state): State<AppState>,
///     authenticated_user: AuthenticatedUser,  // <- 이렇게 사용!
/// ) -> Result<...> {
///     let user_id = authenticated_user.user_id();
///     // ...
/// }
/// ```
///
/// 모든 실패는 동일한 401 응답 (헤더 없음, 형식 오류, 토큰 무효, 비활성 사용자)
#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // 1. Authorization 헤더에서 토큰 추출
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::NotAuthenticated)?;

        // 2. "Bearer <token>" 형식 파싱
        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::NotAuthenticated)?;

        // 3. 토큰 검증 + 사용자 조회
        let user = state
            .auth_state
            .auth_service
            .authenticate(token)
            .await?;

        Ok(AuthenticatedUser { user })
    }
}
