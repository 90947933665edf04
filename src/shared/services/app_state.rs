use std::sync::Arc;
use anyhow::Result;
use crate::shared::config::AppConfig;
use crate::shared::database::{
    Database, InMemoryTokenStore, InMemoryUserStore, RefreshTokenRepository, TokenStore,
    UserRepository, UserStore,
};
use crate::domains::auth::services::state::AuthState;

/// Application state (combines all domain states)
/// 애플리케이션 상태 (모든 도메인 상태를 조합)
///
/// 저장소는 생성 시 주입됨 (전역 싱글톤 없음)
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth_state: AuthState,
}

impl AppState {
    /// 설정에 따라 PostgreSQL 또는 메모리 저장소로 초기화
    /// Build from config: PostgreSQL when DATABASE_URL is set, in-memory otherwise
    pub async fn from_config(config: AppConfig) -> Result<Self> {
        let Some(db_url) = config.database_url.clone() else {
            tracing::warn!("DATABASE_URL is not set; using in-memory stores (data is lost on restart)");
            return Ok(Self::in_memory(config));
        };

        // DB 연결 + 마이그레이션
        let db = Database::new(&db_url).await?;
        db.initialize().await?;

        let users: Arc<dyn UserStore> = Arc::new(UserRepository::new(db.pool().clone()));
        let tokens: Arc<dyn TokenStore> = Arc::new(RefreshTokenRepository::new(db.pool().clone()));

        Ok(Self::with_stores(config, users, tokens))
    }

    /// 메모리 저장소로 생성 (테스트 / 로컬 실행)
    pub fn in_memory(config: AppConfig) -> Self {
        Self::with_stores(
            config,
            Arc::new(InMemoryUserStore::new()),
            Arc::new(InMemoryTokenStore::new()),
        )
    }

    /// 저장소를 직접 주입하여 생성
    /// Build with explicit stores
    pub fn with_stores(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        let auth_state = AuthState::new(&config, users, tokens);

        Self {
            config: Arc::new(config),
            auth_state,
        }
    }
}
