use sqlx::{postgres::PgRow, PgPool, Row};
use anyhow::Context;
use async_trait::async_trait;
use crate::domains::auth::models::{NewUser, ProfileChanges, User};
use crate::shared::database::UserStore;
use crate::shared::errors::StoreError;

const USER_COLUMNS: &str =
    "id, email, password_hash, username, first_name, last_name, is_active, created_at, updated_at";

/// 사용자 Repository (PostgreSQL)
/// PostgreSQL-backed user store
pub struct UserRepository {
    pool: PgPool
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> User {
        User {
            id: row.get::<i64, _>("id") as u64,
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            username: row.get("username"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            is_active: row.get("is_active"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    // 이메일 unique 제약 + ON CONFLICT: 동시 가입 시 하나만 성공
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO users (email, password_hash, username, first_name, last_name, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, TRUE, NOW(), NOW())
            ON CONFLICT (email) DO NOTHING
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.username)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to create user")?;

        match row {
            Some(row) => Ok(Self::row_to_user(&row)),
            None => Err(StoreError::DuplicateEmail { email: new_user.email }),
        }
    }

    // 이메일로 사용자 조회 (로그인용)
    // Get user by email (for login)
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by email")?;

        Ok(row.as_ref().map(Self::row_to_user))
    }

    // ID로 사용자 조회
    // Get user by ID
    async fn get_user_by_id(&self, id: u64) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by id")?;

        Ok(row.as_ref().map(Self::row_to_user))
    }

    async fn update_profile(&self, id: u64, changes: ProfileChanges) -> Result<User, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE users SET
                username = CASE WHEN $2 THEN $3 ELSE username END,
                first_name = CASE WHEN $4 THEN $5 ELSE first_name END,
                last_name = CASE WHEN $6 THEN $7 ELSE last_name END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id as i64)
        .bind(changes.username.is_some())
        .bind(changes.username.flatten())
        .bind(changes.first_name.is_some())
        .bind(changes.first_name.flatten())
        .bind(changes.last_name.is_some())
        .bind(changes.last_name.flatten())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to update user profile")?;

        row.as_ref()
            .map(Self::row_to_user)
            .ok_or(StoreError::UserNotFound { id })
    }

    async fn set_active(&self, id: u64, is_active: bool) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET is_active = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id as i64)
        .bind(is_active)
        .execute(&self.pool)
        .await
        .context("Failed to update user active flag")?;

        if result.rows_affected() == 0 {
            return Err(StoreError::UserNotFound { id });
        }
        Ok(())
    }
}
