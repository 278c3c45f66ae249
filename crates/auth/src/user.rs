//! User record owned by the credential store.
//!
//! # Invariants
//! - Email and phone are unique identity keys (enforced by the store).
//! - At most one canonical session token is valid at any time; binding a new
//!   one supersedes the old immediately.
//! - Login history is append-only; read paths never mutate the record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gatehouse_core::{DomainError, DomainResult, UserId};

use crate::{GeoSnapshot, Role};

/// One append-only login-history entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRecord {
    pub ip_address: String,
    pub location: GeoSnapshot,
    pub logged_at: DateTime<Utc>,
}

impl LoginRecord {
    pub fn new(ip_address: impl Into<String>, location: GeoSnapshot) -> Self {
        Self {
            ip_address: ip_address.into(),
            location,
            logged_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// Argon2id hash in PHC string format. Never the plaintext.
    pub password_hash: String,
    pub role: Role,
    /// The single canonical session token, if a session is active.
    pub access_token: Option<String>,
    pub login_history: Vec<LoginRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a new user record. The email is normalized to lowercase; both
    /// identity fields get minimal shape checks here, full field validation
    /// belongs to the registration/CRUD layer.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: &str,
        phone: &str,
        password_hash: String,
        role: Role,
    ) -> DomainResult<Self> {
        let email = email.trim().to_lowercase();
        if email.len() < 5 || !email.contains('@') {
            return Err(DomainError::validation("invalid email format"));
        }

        let phone = phone.trim().to_string();
        if phone.is_empty() {
            return Err(DomainError::validation("phone cannot be empty"));
        }

        let now = Utc::now();
        Ok(Self {
            id: UserId::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email,
            phone,
            password_hash,
            role,
            access_token: None,
            login_history: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Whether `identifier` names this account (email or phone).
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        self.email.eq_ignore_ascii_case(identifier.trim()) || self.phone == identifier.trim()
    }
}
