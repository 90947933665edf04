use sqlx::{postgres::PgRow, PgPool, Row};
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::domains::auth::models::refresh_token::{RefreshToken, RefreshTokenCreate};
use crate::shared::database::TokenStore;
use crate::shared::errors::StoreError;

/// Refresh Token Repository
/// Refresh Token 데이터베이스 작업 처리 (발급 기록 + 블랙리스트)
pub struct RefreshTokenRepository {
    pool: PgPool,
}

impl RefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_token(row: &PgRow) -> RefreshToken {
        RefreshToken {
            id: row.get("id"),
            jti: row.get("jti"),
            user_id: row.get::<i64, _>("user_id") as u64,
            token_hash: row.get("token_hash"),
            expires_at: row.get("expires_at"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
            revoked_at: row.get("revoked_at"),
        }
    }
}

#[async_trait]
impl TokenStore for RefreshTokenRepository {
    /// Refresh Token 생성 (저장)
    /// Create and store refresh token
    async fn record_issued(&self, data: RefreshTokenCreate) -> Result<RefreshToken, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO refresh_tokens (jti, user_id, token_hash, expires_at, revoked_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NULL, NOW(), NOW())
            RETURNING id, jti, user_id, token_hash, expires_at, created_at, updated_at, revoked_at
            "#,
        )
        .bind(data.jti)
        .bind(data.user_id as i64)  // u64 -> i64 변환 (DB는 BIGINT = i64)
        .bind(&data.token_hash)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .context("Failed to create refresh token")?;

        Ok(Self::row_to_token(&row))
    }

    /// Refresh Token 무효화 (upsert)
    /// 이미 무효화된 행은 WHERE 조건에 걸려 RETURNING 이 비어 있음
    async fn revoke(&self, data: RefreshTokenCreate) -> Result<bool, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO refresh_tokens (jti, user_id, token_hash, expires_at, revoked_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW(), NOW())
            ON CONFLICT (jti) DO UPDATE
                SET revoked_at = NOW(), updated_at = NOW()
                WHERE refresh_tokens.revoked_at IS NULL
            RETURNING id
            "#,
        )
        .bind(data.jti)
        .bind(data.user_id as i64)
        .bind(&data.token_hash)
        .bind(data.expires_at)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to revoke refresh token")?;

        Ok(row.is_some())
    }

    async fn is_revoked(&self, jti: Uuid) -> Result<bool, StoreError> {
        let revoked_at: Option<Option<DateTime<Utc>>> = sqlx::query_scalar(
            r#"
            SELECT revoked_at FROM refresh_tokens WHERE jti = $1
            "#,
        )
        .bind(jti)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to check refresh token revocation")?;

        Ok(matches!(revoked_at, Some(Some(_))))
    }

    /// 사용자의 모든 Refresh Token 무효화
    /// Revoke all refresh tokens for a user
    async fn revoke_all_for_user(&self, user_id: u64) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = NOW(), updated_at = NOW()
            WHERE user_id = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(user_id as i64)  // DB에는 i64로 저장
        .execute(&self.pool)
        .await
        .context("Failed to revoke all refresh tokens for user")?;

        Ok(result.rows_affected())
    }

    /// 만료된 토큰 삭제 (정리 작업)
    /// Delete expired tokens (cleanup)
    async fn delete_expired(&self) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM refresh_tokens
            WHERE expires_at < NOW()
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to delete expired refresh tokens")?;

        Ok(result.rows_affected())
    }
}
