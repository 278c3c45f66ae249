//! Request gate: session check and per-resource permission check.
//!
//! The session gate runs on every protected route and attaches an
//! [`AuthContext`]; the permission gate is layered per mounted resource,
//! with the resource name fixed at mount time (the logical base path).

use std::sync::Arc;

use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;

use gatehouse_auth::{AuthError, AuthService};

use crate::context::AuthContext;
use crate::error::ApiError;

/// Header carrying the session token.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

#[derive(Clone)]
pub struct GateState {
    pub auth: Arc<AuthService>,
}

/// Token presence + signature + session-binding check.
pub async fn session_gate(
    State(state): State<GateState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(AUTH_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());

    let claims = state.auth.verify_request(token).await?;

    req.extensions_mut()
        .insert(AuthContext::new(claims.sub, claims.role));

    Ok(next.run(req).await)
}

#[derive(Clone)]
pub struct PermissionState {
    pub auth: Arc<AuthService>,
    /// Logical base path this gate protects, e.g. `/admin/users`.
    pub resource: String,
}

/// (role, resource, action) membership check; runs after the session gate.
pub async fn permission_gate(
    State(state): State<PermissionState>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx = req
        .extensions()
        .get::<AuthContext>()
        .copied()
        .ok_or(AuthError::MissingToken)?;

    state
        .auth
        .authorize(ctx.role(), &state.resource, req.method().as_str())
        .await?;

    Ok(next.run(req).await)
}
