//! Application configuration from environment variables.
//!
//! Load with `AppConfig::from_env()`; `main` calls `dotenvy::dotenv()` first so a
//! local `.env` file is honoured.

use std::net::SocketAddr;
use std::str::FromStr;
use anyhow::{Context, Result};
use axum::http::HeaderValue;
use chrono::Duration;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// 애플리케이션 설정
/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL URL. `None` → in-memory stores.
    pub database_url: Option<String>,

    /// JWT HMAC secret
    pub jwt_secret: String,

    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,

    /// Refresh 시 기존 Refresh Token 무효화 + 새 토큰 발급
    pub rotate_refresh_tokens: bool,

    pub password_min_length: usize,

    pub bind_addr: SocketAddr,

    pub cors_allowed_origin: HeaderValue,

    /// 만료 토큰 정리 주기 (0 이면 비활성화)
    pub token_cleanup_interval: std::time::Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            jwt_secret: generate_secret(),
            access_token_ttl: Duration::minutes(60),
            refresh_token_ttl: Duration::days(7),
            rotate_refresh_tokens: false,
            password_min_length: 8,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3002)),
            cors_allowed_origin: HeaderValue::from_static("http://localhost:3003"),
            token_cleanup_interval: std::time::Duration::from_secs(3600),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!(
                    "JWT_SECRET is not set; using a random per-process secret (tokens will not survive a restart)"
                );
                defaults.jwt_secret
            }
        };

        let access_minutes: i64 = parse_var("ACCESS_TOKEN_TTL_MINUTES", 60)?;
        let refresh_days: i64 = parse_var("REFRESH_TOKEN_TTL_DAYS", 7)?;
        if access_minutes <= 0 || refresh_days <= 0 {
            anyhow::bail!("Token lifetimes must be positive");
        }

        let cors_allowed_origin = match std::env::var("CORS_ALLOWED_ORIGIN") {
            Ok(origin) => origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS_ALLOWED_ORIGIN: {}", origin))?,
            Err(_) => defaults.cors_allowed_origin,
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            jwt_secret,
            access_token_ttl: Duration::minutes(access_minutes),
            refresh_token_ttl: Duration::days(refresh_days),
            rotate_refresh_tokens: parse_var("ROTATE_REFRESH_TOKENS", false)?,
            password_min_length: parse_var("PASSWORD_MIN_LENGTH", defaults.password_min_length)?,
            bind_addr: parse_var("BIND_ADDR", defaults.bind_addr)?,
            cors_allowed_origin,
            token_cleanup_interval: std::time::Duration::from_secs(parse_var(
                "TOKEN_CLEANUP_INTERVAL_SECS",
                3600u64,
            )?),
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value for {}: {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}

// 64자 랜덤 문자열 (JWT_SECRET 미설정 시)
fn generate_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}
