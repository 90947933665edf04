use crate::domains::auth::models::{ProfileUpdateRequest, UserResponse};
use crate::shared::services::AppState;
use crate::shared::errors::{ApiError, AuthError};
use crate::shared::middleware::{AuthenticatedUser, ValidatedJson};
use axum::{extract::State, Json};

// 대상 레코드는 항상 인증된 사용자 (요청 파라미터로 선택 불가)

#[utoipa::path(
    get,
    path = "/profile/",
    responses(
        (status = 200, description = "Current user profile", body = UserResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("BearerAuth" = [])
    ),
    tag = "Profile"
)]
pub async fn get_profile(
    authenticated_user: AuthenticatedUser,
) -> Json<UserResponse> {
    Json(authenticated_user.user.into())
}

#[utoipa::path(
    put,
    path = "/profile/",
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Profile replaced", body = UserResponse),
        (status = 400, description = "Field validation errors"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("BearerAuth" = [])
    ),
    tag = "Profile"
)]
pub async fn update_profile(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<ProfileUpdateRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    apply_update(&app_state, &authenticated_user, request, false).await
}

#[utoipa::path(
    patch,
    path = "/profile/",
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Profile partially updated", body = UserResponse),
        (status = 400, description = "Field validation errors"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("BearerAuth" = [])
    ),
    tag = "Profile"
)]
pub async fn partial_update_profile(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<ProfileUpdateRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    apply_update(&app_state, &authenticated_user, request, true).await
}

async fn apply_update(
    app_state: &AppState,
    authenticated_user: &AuthenticatedUser,
    request: ProfileUpdateRequest,
    partial: bool,
) -> Result<Json<UserResponse>, ApiError> {
    let user = app_state
        .auth_state
        .auth_service
        .update_profile(authenticated_user.user_id(), request, partial)
        .await
        .map_err(|e: AuthError| -> ApiError { e.into() })?;

    Ok(Json(user.into()))
}
