//! Session binder: single-active-session enforcement.
//!
//! Only the most recently bound token for a user is valid. Binding silently
//! supersedes whatever was stored before; there is no token history.

use std::sync::Arc;

use gatehouse_core::{DomainResult, UserId};

use crate::CredentialStore;

/// Outcome of comparing a presented token against the canonical one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// The presented token is the canonical session token.
    Bound,
    /// Cryptographically valid, but a newer login owns the session
    /// (or no session is active at all).
    Superseded,
}

#[derive(Clone)]
pub struct SessionBinder {
    store: Arc<dyn CredentialStore>,
}

impl SessionBinder {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Store `token` as the user's sole canonical session token.
    ///
    /// Exactly one store write. Concurrent binds for the same user race and
    /// the last write wins; the store's swap is atomic, so there is no
    /// interleaved state.
    pub async fn bind(&self, user_id: UserId, token: &str) -> DomainResult<()> {
        self.store
            .swap_canonical_token(user_id, Some(token.to_string()))
            .await
    }

    /// Compare a presented token against the canonical one.
    pub async fn check(&self, user_id: UserId, presented: &str) -> DomainResult<SessionState> {
        let state = match self.store.canonical_token(user_id).await? {
            Some(canonical) if canonical == presented => SessionState::Bound,
            _ => SessionState::Superseded,
        };
        Ok(state)
    }

    /// Clear the canonical token, ending the active session.
    pub async fn clear(&self, user_id: UserId) -> DomainResult<()> {
        self.store.swap_canonical_token(user_id, None).await
    }
}
