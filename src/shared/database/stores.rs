use async_trait::async_trait;
use uuid::Uuid;
use crate::domains::auth::models::{NewUser, ProfileChanges, RefreshToken, RefreshTokenCreate, User};
use crate::shared::errors::StoreError;

/// 사용자 저장소 인터페이스
/// User persistence consumed by the auth services.
///
/// `create_user` must enforce email uniqueness atomically: of two concurrent
/// creations with the same email exactly one succeeds and the other gets
/// `StoreError::DuplicateEmail`.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn get_user_by_id(&self, id: u64) -> Result<Option<User>, StoreError>;

    async fn update_profile(&self, id: u64, changes: ProfileChanges) -> Result<User, StoreError>;

    async fn set_active(&self, id: u64, is_active: bool) -> Result<(), StoreError>;
}

/// Refresh Token 저장소 인터페이스 (발급 기록 + 블랙리스트)
/// Outstanding refresh tokens and their revocation marks, keyed by `jti`.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// 발급된 토큰 기록
    async fn record_issued(&self, token: RefreshTokenCreate) -> Result<RefreshToken, StoreError>;

    /// Atomically mark `token.jti` revoked, recording it first if it was never
    /// seen. Returns `true` only for the call that performed the revocation.
    async fn revoke(&self, token: RefreshTokenCreate) -> Result<bool, StoreError>;

    async fn is_revoked(&self, jti: Uuid) -> Result<bool, StoreError>;

    /// Returns the number of tokens newly revoked.
    async fn revoke_all_for_user(&self, user_id: u64) -> Result<u64, StoreError>;

    /// 만료된 토큰 삭제 (정리 작업)
    async fn delete_expired(&self) -> Result<u64, StoreError>;
}
