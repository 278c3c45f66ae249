//! Login and logout endpoints for the admin surface.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Extension, Json, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use gatehouse_core::DomainError;

use crate::app::AppState;
use crate::context::AuthContext;
use crate::error::ApiError;
use crate::middleware::AUTH_TOKEN_HEADER;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email or phone; both are unique identity keys.
    pub identifier: String,
    pub password: String,
}

/// `POST /admin/login` — success echoes the new token in `x-auth-token`.
pub async fn login(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(body): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    if body.identifier.trim().is_empty() {
        return Err(ApiError::bad_request("identifier is required"));
    }
    if body.password.len() < 8 {
        return Err(ApiError::bad_request(
            "password must be at least 8 characters",
        ));
    }

    let ip = client_ip(&headers, addr);
    let (token, _user) = state
        .auth
        .login(body.identifier.trim(), &body.password, &ip)
        .await?;

    let header = HeaderValue::from_str(&token)
        .map_err(|e| DomainError::storage(format!("token not header-safe: {e}")))?;

    let mut response = (StatusCode::OK, "Login Successful.").into_response();
    response.headers_mut().insert(AUTH_TOKEN_HEADER, header);
    Ok(response)
}

/// `POST /admin/logout` — clears the canonical session token.
pub async fn logout(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<impl IntoResponse, ApiError> {
    state.auth.logout(ctx.user_id()).await?;
    Ok((StatusCode::OK, "Logged out."))
}

/// Source address for the login-history entry: the first `x-forwarded-for`
/// hop when present, the socket peer otherwise.
fn client_ip(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| peer.ip().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwarded_header_wins_over_peer_address() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());

        let peer: SocketAddr = "127.0.0.1:9999".parse().unwrap();
        assert_eq!(client_ip(&headers, peer), "203.0.113.7");
    }

    #[test]
    fn peer_address_is_the_fallback() {
        let peer: SocketAddr = "192.0.2.44:9999".parse().unwrap();
        assert_eq!(client_ip(&HeaderMap::new(), peer), "192.0.2.44");
    }
}
