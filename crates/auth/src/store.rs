//! Credential store seam.
//!
//! The auth core talks to user persistence through this trait; the infra
//! crate supplies the implementation. `swap_canonical_token` must be a
//! single atomic read-modify-write so concurrent logins resolve to a clean
//! last-write-wins rather than interleaved partial updates.

use async_trait::async_trait;

use gatehouse_core::{DomainResult, UserId};

use crate::{LoginRecord, User};

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up a user by email (case-insensitive) or phone (exact).
    async fn find_by_identifier(&self, identifier: &str) -> DomainResult<Option<User>>;

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;

    /// Current canonical session token, if any.
    async fn canonical_token(&self, id: UserId) -> DomainResult<Option<String>>;

    /// Atomically replace the canonical session token. `None` clears it.
    /// No history of prior tokens is retained.
    async fn swap_canonical_token(&self, id: UserId, token: Option<String>) -> DomainResult<()>;

    /// Append one entry to the user's login history.
    async fn append_login_record(&self, id: UserId, record: LoginRecord) -> DomainResult<()>;

    /// Insert a new user; fails with `Conflict` when the email or phone is
    /// already registered.
    async fn insert(&self, user: User) -> DomainResult<()>;

    /// Replace an existing user record; fails with `NotFound` for unknown
    /// ids and `Conflict` when the new email/phone collides with another
    /// account.
    async fn update(&self, user: User) -> DomainResult<()>;

    /// Remove a user. Returns whether a record was deleted.
    async fn delete(&self, id: UserId) -> DomainResult<bool>;

    /// Page through users in creation order. Returns (total count, page).
    async fn list(&self, page: usize, per_page: usize) -> DomainResult<(usize, Vec<User>)>;
}
