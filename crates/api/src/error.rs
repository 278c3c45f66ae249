//! HTTP mapping for the gateway's failure taxonomy.
//!
//! Status/message pairs are fixed so client behavior stays predictable:
//! the supersede and permission failures in particular are contractual
//! strings, not debug output.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use gatehouse_auth::AuthError;
use gatehouse_core::DomainError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Auth(AuthError::MissingToken) => {
                (StatusCode::UNAUTHORIZED, "Access denied. No token provided.").into_response()
            }
            ApiError::Auth(AuthError::InvalidToken) => {
                (StatusCode::UNAUTHORIZED, "Invalid token.").into_response()
            }
            ApiError::Auth(AuthError::Superseded) => {
                (StatusCode::FORBIDDEN, "Another device logged in.").into_response()
            }
            ApiError::Auth(AuthError::InvalidCredentials) => {
                (StatusCode::BAD_REQUEST, "Invalid email or password.").into_response()
            }
            ApiError::Auth(AuthError::RoleNotAllowed)
            | ApiError::Auth(AuthError::PermissionDenied) => (
                StatusCode::FORBIDDEN,
                "You are not allowed to access this resource.",
            )
                .into_response(),
            ApiError::Auth(AuthError::Store(e)) | ApiError::Domain(e) => domain_response(e),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
        }
    }
}

fn domain_response(error: DomainError) -> Response {
    match error {
        DomainError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
        DomainError::InvalidId(_) | DomainError::NotFound => {
            (StatusCode::BAD_REQUEST, "Invalid user.").into_response()
        }
        DomainError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
        DomainError::Storage(msg) => {
            tracing::error!(error = %msg, "request failed on storage");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.").into_response()
        }
    }
}
