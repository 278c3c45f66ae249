//! `gatehouse-auth` — authentication/authorization core for the admin surface.
//!
//! This crate is intentionally decoupled from HTTP and storage backends. It
//! owns credential verification, signed-token issuance/verification,
//! single-active-session enforcement, and role/resource/action permission
//! evaluation. Storage and the geolocation provider are reached through
//! traits so the surrounding layers can inject their own implementations.

pub mod claims;
pub mod error;
pub mod geo;
pub mod grants;
pub mod password;
pub mod roles;
pub mod service;
pub mod session;
pub mod store;
pub mod token;
pub mod user;

pub use claims::Claims;
pub use error::{AuthError, AuthResult};
pub use geo::{GeoError, GeoLookup, GeoSnapshot, NoGeoLookup};
pub use grants::{Action, Decision, Grant, GrantStore, PermissionEvaluator};
pub use roles::Role;
pub use service::AuthService;
pub use session::{SessionBinder, SessionState};
pub use store::CredentialStore;
pub use user::{LoginRecord, User};
pub use token::TokenCodec;
