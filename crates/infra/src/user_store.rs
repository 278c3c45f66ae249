//! In-memory credential store.
//!
//! Every trait method takes the lock once, so the canonical-token swap and
//! the uniqueness checks are atomic read-modify-writes. Concurrent logins
//! for one user resolve to last-write-wins with no interleaved state.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use gatehouse_auth::{CredentialStore, LoginRecord, User};
use gatehouse_core::{DomainError, DomainResult, UserId};

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store, e.g. with a bootstrap administrator.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let store = Self::new();
        {
            let mut map = store.inner.write().expect("user store lock poisoned");
            for user in users {
                map.insert(user.id, user);
            }
        }
        store
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().expect("user store lock poisoned").is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<UserId, User>> {
        self.inner.read().expect("user store lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<UserId, User>> {
        self.inner.write().expect("user store lock poisoned")
    }
}

#[async_trait]
impl CredentialStore for InMemoryUserStore {
    async fn find_by_identifier(&self, identifier: &str) -> DomainResult<Option<User>> {
        let map = self.read();
        Ok(map.values().find(|u| u.matches_identifier(identifier)).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self.read().get(&id).cloned())
    }

    async fn canonical_token(&self, id: UserId) -> DomainResult<Option<String>> {
        let map = self.read();
        let user = map.get(&id).ok_or(DomainError::NotFound)?;
        Ok(user.access_token.clone())
    }

    async fn swap_canonical_token(&self, id: UserId, token: Option<String>) -> DomainResult<()> {
        let mut map = self.write();
        let user = map.get_mut(&id).ok_or(DomainError::NotFound)?;
        user.access_token = token;
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn append_login_record(&self, id: UserId, record: LoginRecord) -> DomainResult<()> {
        let mut map = self.write();
        let user = map.get_mut(&id).ok_or(DomainError::NotFound)?;
        user.login_history.push(record);
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn insert(&self, user: User) -> DomainResult<()> {
        let mut map = self.write();
        if map
            .values()
            .any(|u| u.email == user.email || u.phone == user.phone)
        {
            return Err(DomainError::conflict("email or phone already registered"));
        }
        map.insert(user.id, user);
        Ok(())
    }

    async fn update(&self, user: User) -> DomainResult<()> {
        let mut map = self.write();
        if !map.contains_key(&user.id) {
            return Err(DomainError::NotFound);
        }
        if map
            .values()
            .any(|u| u.id != user.id && (u.email == user.email || u.phone == user.phone))
        {
            return Err(DomainError::conflict(
                "another user already registered with this email or phone",
            ));
        }
        map.insert(user.id, user);
        Ok(())
    }

    async fn delete(&self, id: UserId) -> DomainResult<bool> {
        Ok(self.write().remove(&id).is_some())
    }

    async fn list(&self, page: usize, per_page: usize) -> DomainResult<(usize, Vec<User>)> {
        let map = self.read();
        let mut users: Vec<User> = map.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.as_uuid().cmp(b.id.as_uuid())));

        let total = users.len();
        let start = page.saturating_mul(per_page).min(total);
        let end = start.saturating_add(per_page).min(total);
        Ok((total, users[start..end].to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use gatehouse_auth::Role;

    use super::*;

    fn user(email: &str, phone: &str) -> User {
        User::new("Test", "User", email, phone, "phc".to_string(), Role::User).unwrap()
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_email_or_phone() {
        let store = InMemoryUserStore::new();
        store.insert(user("a@example.com", "+1")).await.unwrap();

        let by_email = store.insert(user("a@example.com", "+2")).await;
        assert!(matches!(by_email, Err(DomainError::Conflict(_))));

        let by_phone = store.insert(user("b@example.com", "+1")).await;
        assert!(matches!(by_phone, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn swap_replaces_token_without_history() {
        let store = InMemoryUserStore::new();
        let u = user("a@example.com", "+1");
        let id = u.id;
        store.insert(u).await.unwrap();

        store.swap_canonical_token(id, Some("t1".into())).await.unwrap();
        store.swap_canonical_token(id, Some("t2".into())).await.unwrap();
        assert_eq!(store.canonical_token(id).await.unwrap(), Some("t2".into()));

        store.swap_canonical_token(id, None).await.unwrap();
        assert_eq!(store.canonical_token(id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_pages_in_creation_order() {
        let store = InMemoryUserStore::new();
        for i in 0..5 {
            store
                .insert(user(&format!("u{i}@example.com"), &format!("+{i}")))
                .await
                .unwrap();
        }

        let (total, first) = store.list(0, 2).await.unwrap();
        assert_eq!(total, 5);
        assert_eq!(first.len(), 2);

        let (_, last) = store.list(2, 2).await.unwrap();
        assert_eq!(last.len(), 1);

        let (_, beyond) = store.list(9, 2).await.unwrap();
        assert!(beyond.is_empty());
    }
}
