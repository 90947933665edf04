use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use auth_api::shared::services::TokenCleanupScheduler;
use auth_api::{create_app, AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // .env 파일 로드 (있으면)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let bind_addr = config.bind_addr;
    let cleanup_interval = config.token_cleanup_interval;

    // AppState 생성 (저장소 + 모든 Service 초기화)
    let app_state = AppState::from_config(config)
        .await
        .context("Failed to initialize AppState")?;

    // 만료 토큰 정리 스케줄러 시작
    let cleanup = TokenCleanupScheduler::new(app_state.auth_state.jwt_service.clone(), cleanup_interval);
    let _cleanup_task = cleanup.start();

    let app = create_app(app_state);

    // 서버 시작
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    tracing::info!("Server running on http://{}", bind_addr);
    tracing::info!("Swagger UI available at http://{}/api", bind_addr);

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
