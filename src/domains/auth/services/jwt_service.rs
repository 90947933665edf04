// src/domains/auth/services/jwt_service.rs
use std::sync::Arc;
use crate::shared::database::TokenStore;
use crate::shared::errors::AuthError;
use crate::domains::auth::models::jwt::{Claims, TokenPair, TokenType};
use crate::domains::auth::models::refresh_token::RefreshTokenCreate;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Sha256, Digest};

/// 토큰 수명 / 회전 설정
/// Token lifetimes and rotation policy
#[derive(Debug, Clone, Copy)]
pub struct TokenSettings {
    pub access_ttl: chrono::Duration,
    pub refresh_ttl: chrono::Duration,
    pub rotate_refresh_tokens: bool,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            access_ttl: chrono::Duration::minutes(60),
            refresh_ttl: chrono::Duration::days(7),
            rotate_refresh_tokens: false,
        }
    }
}

/// JWT 서비스
/// JWT Service: issues access/refresh pairs, verifies them and blacklists
/// refresh tokens through the token store.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    settings: TokenSettings,
    token_store: Arc<dyn TokenStore>,
}

impl JwtService {
    /// JWT Service 생성
    /// Create JWT Service
    pub fn new(secret: &str, settings: TokenSettings, token_store: Arc<dyn TokenStore>) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        // 만료 여유 시간 없음
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key,
            decoding_key,
            validation,
            settings,
            token_store,
        }
    }

    /// Access + Refresh Token 쌍 발급 (Refresh Token 은 발급 기록 저장)
    /// Issue a fresh pair; the refresh token is recorded as outstanding
    pub async fn issue(&self, user_id: u64, email: &str) -> Result<TokenPair, AuthError> {
        let refresh = self.generate_refresh_token(user_id, email).await?;
        let access = self.generate_access_token(user_id, email.to_string())?;

        Ok(TokenPair { access, refresh })
    }

    /// Access Token 발급 (짧은 수명)
    /// Generate Access Token (short lifetime)
    pub fn generate_access_token(&self, user_id: u64, email: String) -> Result<String, AuthError> {
        let claims = Claims::new(TokenType::Access, user_id, email, self.settings.access_ttl);
        self.encode_claims(&claims)
    }

    /// Refresh Token 발급 및 저장
    /// Generate and record a refresh token
    async fn generate_refresh_token(&self, user_id: u64, email: &str) -> Result<String, AuthError> {
        let claims = Claims::new(TokenType::Refresh, user_id, email.to_string(), self.settings.refresh_ttl);
        let token = self.encode_claims(&claims)?;

        self.token_store
            .record_issued(self.token_record(&claims, &token)?)
            .await?;

        Ok(token)
    }

    fn encode_claims(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to generate token: {}", e)))
    }

    fn token_record(&self, claims: &Claims, token: &str) -> Result<RefreshTokenCreate, AuthError> {
        Ok(RefreshTokenCreate {
            jti: claims.jti,
            user_id: claims.user_id,
            token_hash: self.hash_refresh_token(token),
            expires_at: claims.expires_at().ok_or(AuthError::InvalidToken)?,
        })
    }

    /// Refresh Token 해싱 (DB 저장용)
    /// Hash Refresh Token (for database storage)
    pub fn hash_refresh_token(&self, token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    // 서명 / 만료 / 토큰 종류 검증
    fn decode_as(&self, token: &str, expected: TokenType) -> Result<Claims, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| AuthError::InvalidToken)?
            .claims;

        if claims.token_type != expected {
            return Err(AuthError::InvalidToken);
        }
        Ok(claims)
    }

    /// Access Token 검증 (서명 / 만료만, 저장소 조회 없음)
    /// Verify Access Token by signature, expiry and type only
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.decode_as(token, TokenType::Access)
    }

    /// Refresh Token 검증 (블랙리스트 확인 포함)
    /// Verify Refresh Token, including the blacklist
    pub async fn verify_refresh_token(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = self.decode_as(token, TokenType::Refresh)?;

        if self.token_store.is_revoked(claims.jti).await? {
            return Err(AuthError::InvalidToken);
        }
        Ok(claims)
    }

    /// Refresh Token 으로 새 Access Token 발급
    /// Mint a new access token; rotates the refresh token when enabled
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let claims = self.verify_refresh_token(refresh_token).await?;
        self.refresh_verified(&claims, refresh_token).await
    }

    /// 이미 검증된 Claims 로 토큰 갱신
    /// Refresh using claims already returned by `verify_refresh_token`
    pub async fn refresh_verified(&self, claims: &Claims, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let access = self.generate_access_token(claims.user_id, claims.email.clone())?;

        if !self.settings.rotate_refresh_tokens {
            return Ok(TokenPair {
                access,
                refresh: refresh_token.to_string(),
            });
        }

        // 기존 토큰을 먼저 무효화한 후 새 토큰 생성 (동시 갱신 시 하나만 성공)
        let revoked = self
            .token_store
            .revoke(self.token_record(claims, refresh_token)?)
            .await?;
        if !revoked {
            return Err(AuthError::InvalidToken);
        }

        let refresh = self.generate_refresh_token(claims.user_id, &claims.email).await?;
        Ok(TokenPair { access, refresh })
    }

    /// Refresh Token 블랙리스트 등록
    /// Blacklist a refresh token.
    ///
    /// `InvalidToken` when the token is malformed, expired, not a refresh token
    /// or already revoked. Store failures come back as `DatabaseError`.
    pub async fn revoke(&self, refresh_token: &str) -> Result<(), AuthError> {
        let claims = self.decode_as(refresh_token, TokenType::Refresh)?;

        let revoked = self
            .token_store
            .revoke(self.token_record(&claims, refresh_token)?)
            .await?;

        if revoked { Ok(()) } else { Err(AuthError::InvalidToken) }
    }

    /// 사용자의 모든 Refresh Token 무효화 (모든 기기에서 로그아웃)
    /// Revoke all refresh tokens for user (logout from all devices)
    pub async fn revoke_all_for_user(&self, user_id: u64) -> Result<u64, AuthError> {
        Ok(self.token_store.revoke_all_for_user(user_id).await?)
    }

    /// 만료된 발급 기록 삭제
    /// Delete outstanding-token rows past their natural expiry
    pub async fn purge_expired(&self) -> Result<u64, AuthError> {
        Ok(self.token_store.delete_expired().await?)
    }
}
