use std::collections::HashMap;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;
use crate::domains::auth::models::{RefreshToken, RefreshTokenCreate};
use crate::shared::database::TokenStore;
use crate::shared::errors::StoreError;

#[derive(Default)]
struct TokenTable {
    next_id: i64,
    tokens: HashMap<Uuid, RefreshToken>,
}

impl TokenTable {
    fn insert(&mut self, data: RefreshTokenCreate) -> &mut RefreshToken {
        self.next_id += 1;
        let now = Utc::now();
        let token = RefreshToken {
            id: self.next_id,
            jti: data.jti,
            user_id: data.user_id,
            token_hash: data.token_hash,
            expires_at: data.expires_at,
            created_at: now,
            updated_at: now,
            revoked_at: None,
        };
        self.tokens.entry(data.jti).or_insert(token)
    }
}

/// 메모리 기반 Refresh Token 저장소
/// In-memory outstanding-token table with revocation marks
#[derive(Default)]
pub struct InMemoryTokenStore {
    table: RwLock<TokenTable>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, jti: Uuid) -> Option<RefreshToken> {
        self.table.read().tokens.get(&jti).cloned()
    }

    pub fn len(&self) -> usize {
        self.table.read().tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn record_issued(&self, data: RefreshTokenCreate) -> Result<RefreshToken, StoreError> {
        let mut table = self.table.write();
        Ok(table.insert(data).clone())
    }

    async fn revoke(&self, data: RefreshTokenCreate) -> Result<bool, StoreError> {
        let mut table = self.table.write();
        let jti = data.jti;
        if !table.tokens.contains_key(&jti) {
            table.insert(data);
        }

        match table.tokens.get_mut(&jti) {
            Some(token) if token.revoked_at.is_none() => {
                let now = Utc::now();
                token.revoked_at = Some(now);
                token.updated_at = now;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn is_revoked(&self, jti: Uuid) -> Result<bool, StoreError> {
        Ok(self
            .table
            .read()
            .tokens
            .get(&jti)
            .is_some_and(RefreshToken::is_revoked))
    }

    async fn revoke_all_for_user(&self, user_id: u64) -> Result<u64, StoreError> {
        let mut table = self.table.write();
        let now = Utc::now();
        let mut revoked = 0;
        for token in table.tokens.values_mut() {
            if token.user_id == user_id && token.revoked_at.is_none() {
                token.revoked_at = Some(now);
                token.updated_at = now;
                revoked += 1;
            }
        }
        Ok(revoked)
    }

    async fn delete_expired(&self) -> Result<u64, StoreError> {
        let mut table = self.table.write();
        let before = table.tokens.len();
        table.tokens.retain(|_, token| !token.is_expired());
        Ok((before - table.tokens.len()) as u64)
    }
}
