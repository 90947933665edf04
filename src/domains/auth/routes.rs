// Auth domain routes
// 인증 도메인 라우터
use axum::{routing::{get, post}, Router};
use crate::domains::auth::handlers::{auth_handler, profile_handler};
use crate::shared::services::AppState;

/// Create authentication router
/// 인증 라우터 생성
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register/", post(auth_handler::register))
        .route("/login/", post(auth_handler::login))
        .route("/logout/", post(auth_handler::logout))
        .route("/token/refresh/", post(auth_handler::refresh_token))
        .route(
            "/profile/",
            get(profile_handler::get_profile)
                .put(profile_handler::update_profile)
                .patch(profile_handler::partial_update_profile),
        )
}
