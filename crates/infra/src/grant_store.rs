//! In-memory grant store.
//!
//! The request path only reads; grants are loaded at startup and replaced
//! wholesale through [`InMemoryGrantStore::reload`] when administered out
//! of band. No partial invalidation protocol exists.

use std::sync::RwLock;

use async_trait::async_trait;

use gatehouse_auth::{Grant, GrantStore, Role};
use gatehouse_core::DomainResult;

#[derive(Debug, Default)]
pub struct InMemoryGrantStore {
    grants: RwLock<Vec<Grant>>,
}

impl InMemoryGrantStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grants(grants: impl IntoIterator<Item = Grant>) -> Self {
        Self {
            grants: RwLock::new(grants.into_iter().collect()),
        }
    }

    /// Replace the whole permission table.
    pub fn reload(&self, grants: impl IntoIterator<Item = Grant>) {
        let mut table = self.grants.write().expect("grant store lock poisoned");
        *table = grants.into_iter().collect();
    }
}

#[async_trait]
impl GrantStore for InMemoryGrantStore {
    async fn grants_for(&self, role: Role) -> DomainResult<Vec<Grant>> {
        let table = self.grants.read().expect("grant store lock poisoned");
        Ok(table.iter().filter(|g| g.role == role).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use gatehouse_auth::Action;

    use super::*;

    #[tokio::test]
    async fn grants_are_filtered_by_role() {
        let store = InMemoryGrantStore::with_grants([
            Grant::new(Role::ContentAdmin, "/admin/users", Action::Read),
            Grant::new(Role::SuperAdmin, "/admin/users", Action::Delete),
        ]);

        let grants = store.grants_for(Role::ContentAdmin).await.unwrap();
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].action, Action::Read);
    }

    #[tokio::test]
    async fn reload_replaces_the_table() {
        let store = InMemoryGrantStore::with_grants([Grant::new(
            Role::ContentAdmin,
            "/admin/users",
            Action::Read,
        )]);

        store.reload([Grant::new(Role::ContentAdmin, "/admin/users", Action::Update)]);

        let grants = store.grants_for(Role::ContentAdmin).await.unwrap();
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].action, Action::Update);
    }
}
