use gatehouse_auth::Role;
use gatehouse_core::UserId;

/// Authenticated identity attached to a request by the session gate.
///
/// The role is the token's issuance-time snapshot, not a fresh store read.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AuthContext {
    user_id: UserId,
    role: Role,
}

impl AuthContext {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn role(&self) -> Role {
        self.role
    }
}
