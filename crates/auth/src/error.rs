//! Failure taxonomy for the gateway core.
//!
//! Every authentication/authorization failure short-circuits the request
//! before any handler logic runs. The geolocation provider is the only
//! collaborator whose failures are recovered locally; they never appear here.

use thiserror::Error;

use gatehouse_core::DomainError;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No credential was presented at all.
    #[error("no token provided")]
    MissingToken,

    /// Bad signature, malformed structure, or expired claims.
    #[error("invalid token")]
    InvalidToken,

    /// The token verified cryptographically but is not the canonical
    /// session token — a newer login superseded it.
    #[error("session superseded by a newer login")]
    Superseded,

    /// Unknown identifier or wrong password. Deliberately conflated so a
    /// caller cannot probe which accounts exist.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Credentials were valid but the account's role may not open a
    /// session on this surface.
    #[error("role not allowed")]
    RoleNotAllowed,

    /// Valid session, but no grant covers (role, resource, action).
    #[error("permission denied")]
    PermissionDenied,

    /// The credential or grant store failed underneath the check.
    #[error(transparent)]
    Store(#[from] DomainError),
}
