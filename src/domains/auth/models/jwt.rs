use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 토큰 종류
/// Token kind, carried in the `token_type` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT Claims (토큰에 포함될 데이터)
/// JWT Claims (data to be included in token)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 토큰 종류 (access / refresh)
    pub token_type: TokenType,

    /// 토큰 고유 ID (블랙리스트 키)
    /// Unique token identifier (blacklist key)
    pub jti: Uuid,

    /// 사용자 ID
    /// User ID
    pub user_id: u64,

    /// 이메일
    /// Email
    pub email: String,

    /// 만료 시간 (Unix timestamp)
    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// 발급 시간 (Unix timestamp)
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// 새 Claims 생성 (만료 시간 자동 계산, 새 jti)
    /// Create new Claims with a fresh jti; expiry is now + ttl
    pub fn new(token_type: TokenType, user_id: u64, email: String, ttl: chrono::Duration) -> Self {
        let now = chrono::Utc::now().timestamp();

        Self {
            token_type,
            jti: Uuid::new_v4(),
            user_id,
            email,
            exp: now + ttl.num_seconds(),
            iat: now,
        }
    }

    pub fn expires_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp(self.exp, 0)
    }
}

/// 발급된 토큰 쌍
/// Issued access/refresh pair
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}
