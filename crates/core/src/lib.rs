//! `gatehouse-core` — shared kernel for the gateway.
//!
//! Identifiers and the domain error model. Nothing here knows about HTTP,
//! tokens, or storage backends.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::UserId;
