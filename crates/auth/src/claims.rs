use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gatehouse_core::UserId;

use crate::Role;

/// Signed token claims.
///
/// The role is a snapshot taken at issuance time. It is not re-read from the
/// store on every check, so a role change lands only at the next login; the
/// session-binding comparison is the sole per-request store consultation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user this token was issued to.
    pub sub: UserId,

    /// Role snapshot at issuance time.
    pub role: Role,

    /// Unique token id. Two logins by the same user must produce distinct
    /// tokens, or superseding the earlier one would be unobservable.
    pub jti: Uuid,

    /// Optional expiry (Unix seconds). Session superseding is the primary
    /// invalidation mechanism; expiry is defense in depth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    pub fn new(sub: UserId, role: Role) -> Self {
        Self {
            sub,
            role,
            jti: Uuid::now_v7(),
            exp: None,
        }
    }

    pub fn with_expiry(sub: UserId, role: Role, exp: i64) -> Self {
        Self {
            sub,
            role,
            jti: Uuid::now_v7(),
            exp: Some(exp),
        }
    }
}
