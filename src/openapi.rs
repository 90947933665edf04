use utoipa::OpenApi;
use crate::domains::auth::models::*;
use crate::domains::hello::models::*;

// OpenAPI 스키마 정의: Swagger 문서 자동 생성
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::domains::hello::handlers::hello_handler::hello,
        crate::domains::auth::handlers::auth_handler::register,
        crate::domains::auth::handlers::auth_handler::login,
        crate::domains::auth::handlers::auth_handler::logout,
        crate::domains::auth::handlers::auth_handler::refresh_token,
        crate::domains::auth::handlers::profile_handler::get_profile,
        crate::domains::auth::handlers::profile_handler::update_profile,
        crate::domains::auth::handlers::profile_handler::partial_update_profile
    ),
    components(schemas(
        HelloResponse,
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        LogoutRequest,
        TokenRefreshRequest,
        TokenRefreshResponse,
        MessageResponse,
        ErrorResponse,
        ProfileUpdateRequest,
        UserResponse
    )),
    modifiers(
        &SecurityAddon
    ),
    tags(
        (name = "Hello", description = "Greeting / health endpoint"),
        (name = "Auth", description = "Registration, login, logout and token refresh"),
        (name = "Profile", description = "Authenticated user's own profile")
    ),
    info(
        title = "Auth API Server",
        description = "Token-based authentication API",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

// Security scheme 정의: Swagger UI에서 "Authorize" 버튼 추가
pub struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
