// Auth domain state
// 인증 도메인 상태
use std::sync::Arc;
use crate::shared::config::AppConfig;
use crate::shared::database::{TokenStore, UserStore};
use crate::domains::auth::services::{AuthService, JwtService, PasswordPolicy, TokenSettings};

/// Auth domain state
/// 인증 도메인에서 필요한 서비스들을 포함하는 상태
#[derive(Clone)]
pub struct AuthState {
    pub auth_service: AuthService,
    pub jwt_service: JwtService,
}

impl AuthState {
    /// Create AuthState from the configured stores
    /// AuthState 생성 (저장소 주입)
    pub fn new(config: &AppConfig, users: Arc<dyn UserStore>, tokens: Arc<dyn TokenStore>) -> Self {
        let jwt_service = JwtService::new(
            &config.jwt_secret,
            TokenSettings {
                access_ttl: config.access_token_ttl,
                refresh_ttl: config.refresh_token_ttl,
                rotate_refresh_tokens: config.rotate_refresh_tokens,
            },
            tokens,
        );
        let password_policy = PasswordPolicy {
            min_length: config.password_min_length,
        };

        Self {
            auth_service: AuthService::new(users, jwt_service.clone(), password_policy),
            jwt_service,
        }
    }
}
