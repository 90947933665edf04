use std::collections::HashMap;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use crate::domains::auth::models::{NewUser, ProfileChanges, User};
use crate::shared::database::UserStore;
use crate::shared::errors::StoreError;

#[derive(Default)]
struct UserTable {
    next_id: u64,
    users: HashMap<u64, User>,
    by_email: HashMap<String, u64>,
}

/// 메모리 기반 사용자 저장소 (테스트 / DATABASE_URL 미설정 시)
/// In-memory user store; not durable across restarts
#[derive(Default)]
pub struct InMemoryUserStore {
    table: RwLock<UserTable>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.table.read().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        // check + insert under one write lock
        let mut table = self.table.write();
        if table.by_email.contains_key(&new_user.email) {
            return Err(StoreError::DuplicateEmail { email: new_user.email });
        }

        table.next_id += 1;
        let now = Utc::now();
        let user = User {
            id: table.next_id,
            email: new_user.email,
            password_hash: new_user.password_hash,
            username: new_user.username,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        table.by_email.insert(user.email.clone(), user.id);
        table.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let table = self.table.read();
        Ok(table
            .by_email
            .get(email)
            .and_then(|id| table.users.get(id))
            .cloned())
    }

    async fn get_user_by_id(&self, id: u64) -> Result<Option<User>, StoreError> {
        Ok(self.table.read().users.get(&id).cloned())
    }

    async fn update_profile(&self, id: u64, changes: ProfileChanges) -> Result<User, StoreError> {
        let mut table = self.table.write();
        let user = table
            .users
            .get_mut(&id)
            .ok_or(StoreError::UserNotFound { id })?;

        changes.apply_to(user);
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn set_active(&self, id: u64, is_active: bool) -> Result<(), StoreError> {
        let mut table = self.table.write();
        let user = table
            .users
            .get_mut(&id)
            .ok_or(StoreError::UserNotFound { id })?;

        user.is_active = is_active;
        user.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            username: None,
            first_name: None,
            last_name: None,
        }
    }

    #[tokio::test]
    async fn rejects_duplicate_email() {
        let store = InMemoryUserStore::new();
        store.create_user(new_user("a@example.com")).await.unwrap();

        let err = store.create_user(new_user("a@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail { .. }));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creations_admit_one_winner() {
        let store = Arc::new(InMemoryUserStore::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.create_user(new_user("race@example.com")).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn update_and_deactivate() {
        let store = InMemoryUserStore::new();
        let user = store.create_user(new_user("b@example.com")).await.unwrap();

        let changes = ProfileChanges {
            first_name: Some(Some("Bea".to_string())),
            ..Default::default()
        };
        let updated = store.update_profile(user.id, changes).await.unwrap();
        assert_eq!(updated.first_name.as_deref(), Some("Bea"));

        store.set_active(user.id, false).await.unwrap();
        let fetched = store.get_user_by_email("b@example.com").await.unwrap().unwrap();
        assert!(!fetched.is_active);

        let missing = store.set_active(999, false).await.unwrap_err();
        assert!(matches!(missing, StoreError::UserNotFound { id: 999 }));
    }
}
