use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use crate::domains::auth::services::JwtService;

/// 만료 토큰 정리 스케줄러
/// Expired Refresh Token Cleanup Scheduler
///
/// 주기적으로 만료된 Refresh Token 발급 기록 삭제
#[derive(Clone)]
pub struct TokenCleanupScheduler {
    jwt_service: JwtService,

    /// 실행 주기
    period: Duration,
}

impl TokenCleanupScheduler {
    /// 새 스케줄러 생성
    /// Create new scheduler
    pub fn new(jwt_service: JwtService, period: Duration) -> Self {
        Self {
            jwt_service,
            period,
        }
    }

    /// 스케줄러 시작
    /// Start the background task; `None` when the period is zero
    pub fn start(&self) -> Option<JoinHandle<()>> {
        if self.period.is_zero() {
            tracing::info!("Token cleanup scheduler disabled (interval = 0)");
            return None;
        }

        let scheduler = self.clone();
        Some(tokio::spawn(async move {
            let mut ticker = interval(scheduler.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                scheduler.run_once().await;
            }
        }))
    }

    /// 한 번 실행
    /// Run one purge pass; returns the number of deleted rows
    pub async fn run_once(&self) -> u64 {
        match self.jwt_service.purge_expired().await {
            Ok(deleted) => {
                tracing::debug!(deleted, "Purged expired refresh tokens");
                deleted
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to purge expired refresh tokens");
                0
            }
        }
    }
}
