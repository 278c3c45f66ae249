//! Permission grants and the evaluator over them.
//!
//! Authorization is pure (role, resource, action) set membership: no role
//! inheritance, no wildcard matching, no per-instance ownership checks.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use gatehouse_core::DomainResult;

use crate::Role;

/// The closed action set grants can name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }

    /// Map an HTTP verb onto the action set. Verbs outside the mapping
    /// (PATCH, HEAD, ...) are unsupported and must deny by default.
    pub fn from_method(method: &str) -> Option<Self> {
        match method {
            "POST" => Some(Action::Create),
            "GET" => Some(Action::Read),
            "PUT" => Some(Action::Update),
            "DELETE" => Some(Action::Delete),
            _ => None,
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule stating that a role may perform an action on a resource.
///
/// Identified by (role, resource, action); duplicate records are tolerated
/// as redundant. The attribute list is informational at this layer —
/// field-level filtering is a CRUD concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grant {
    pub role: Role,
    pub resource: String,
    pub action: Action,
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl Grant {
    pub fn new(role: Role, resource: impl Into<String>, action: Action) -> Self {
        Self {
            role,
            resource: resource.into(),
            action,
            attributes: vec!["*".to_string()],
        }
    }

    pub fn matches(&self, resource: &str, action: Action) -> bool {
        self.resource == resource && self.action == action
    }
}

/// Outcome of a permission evaluation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Decision {
    Granted,
    Denied,
}

/// Read-only grant source. Grants are administered out of band; the request
/// path never writes here.
#[async_trait]
pub trait GrantStore: Send + Sync {
    async fn grants_for(&self, role: Role) -> DomainResult<Vec<Grant>>;
}

#[derive(Clone)]
pub struct PermissionEvaluator {
    store: Arc<dyn GrantStore>,
}

impl PermissionEvaluator {
    pub fn new(store: Arc<dyn GrantStore>) -> Self {
        Self { store }
    }

    /// Allow iff any grant for `role` matches (resource, action) exactly.
    pub async fn evaluate(
        &self,
        role: Role,
        resource: &str,
        action: Action,
    ) -> DomainResult<Decision> {
        let grants = self.store.grants_for(role).await?;
        if grants.iter().any(|g| g.matches(resource, action)) {
            Ok(Decision::Granted)
        } else {
            Ok(Decision::Denied)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedGrants(Vec<Grant>);

    #[async_trait]
    impl GrantStore for FixedGrants {
        async fn grants_for(&self, role: Role) -> DomainResult<Vec<Grant>> {
            Ok(self.0.iter().filter(|g| g.role == role).cloned().collect())
        }
    }

    fn evaluator() -> PermissionEvaluator {
        PermissionEvaluator::new(Arc::new(FixedGrants(vec![
            Grant::new(Role::ContentAdmin, "/admin/users", Action::Read),
            Grant::new(Role::SuperAdmin, "/admin/users", Action::Delete),
        ])))
    }

    #[tokio::test]
    async fn matching_grant_is_granted() {
        let d = evaluator()
            .evaluate(Role::ContentAdmin, "/admin/users", Action::Read)
            .await
            .unwrap();
        assert_eq!(d, Decision::Granted);
    }

    #[tokio::test]
    async fn missing_action_is_denied() {
        let d = evaluator()
            .evaluate(Role::ContentAdmin, "/admin/users", Action::Delete)
            .await
            .unwrap();
        assert_eq!(d, Decision::Denied);
    }

    #[tokio::test]
    async fn grants_do_not_leak_across_roles() {
        let d = evaluator()
            .evaluate(Role::AccountManager, "/admin/users", Action::Read)
            .await
            .unwrap();
        assert_eq!(d, Decision::Denied);
    }

    #[tokio::test]
    async fn resource_match_is_exact() {
        let d = evaluator()
            .evaluate(Role::ContentAdmin, "/admin/users/extra", Action::Read)
            .await
            .unwrap();
        assert_eq!(d, Decision::Denied);
    }

    #[test]
    fn verb_mapping_covers_the_closed_set_only() {
        assert_eq!(Action::from_method("POST"), Some(Action::Create));
        assert_eq!(Action::from_method("GET"), Some(Action::Read));
        assert_eq!(Action::from_method("PUT"), Some(Action::Update));
        assert_eq!(Action::from_method("DELETE"), Some(Action::Delete));
        assert_eq!(Action::from_method("PATCH"), None);
        assert_eq!(Action::from_method("OPTIONS"), None);
    }
}
