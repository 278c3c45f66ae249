//! Router construction with explicit dependency injection.
//!
//! All wiring flows through [`build_app`]: the binary passes env-derived
//! config and real collaborators, tests pass seeded in-memory stores and a
//! stub geolocation lookup. No service state is process-global.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::Router;

use gatehouse_auth::{
    AuthService, CredentialStore, GeoLookup, GrantStore, NoGeoLookup, TokenCodec,
};
use gatehouse_infra::GeoIpifyClient;

use crate::config::AppConfig;
use crate::middleware::{GateState, PermissionState, permission_gate, session_gate};
use crate::routes;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub users: Arc<dyn CredentialStore>,
}

/// Build the full router from injected collaborators.
pub fn build_app(
    config: &AppConfig,
    users: Arc<dyn CredentialStore>,
    grants: Arc<dyn GrantStore>,
    geo: Arc<dyn GeoLookup>,
) -> Router {
    let codec = match config.token_ttl {
        Some(ttl) => TokenCodec::with_ttl(config.jwt_secret.as_bytes(), ttl),
        None => TokenCodec::new(config.jwt_secret.as_bytes()),
    };

    let auth = Arc::new(AuthService::new(
        codec,
        users.clone(),
        grants,
        geo,
        config.allowed_roles.clone(),
    ));

    router(auth, users)
}

/// Geolocation lookup matching the config: the ipify client when a provider
/// is configured, the always-Unknown stub otherwise.
pub fn geo_lookup(config: &AppConfig) -> Arc<dyn GeoLookup> {
    match &config.geo {
        Some(geo) => Arc::new(GeoIpifyClient::new(
            geo.endpoint.clone(),
            geo.api_key.clone(),
            geo.deadline,
        )),
        None => {
            tracing::warn!("geolocation provider not configured; login history records Unknown");
            Arc::new(NoGeoLookup)
        }
    }
}

fn router(auth: Arc<AuthService>, users: Arc<dyn CredentialStore>) -> Router {
    let state = AppState {
        auth: auth.clone(),
        users,
    };

    // Resource name = mount base path, compared literally against grants.
    let users_routes = Router::new()
        .route("/", post(routes::users::create).get(routes::users::list))
        .route(
            "/:id",
            put(routes::users::update).delete(routes::users::remove),
        )
        .layer(axum::middleware::from_fn_with_state(
            PermissionState {
                auth: auth.clone(),
                resource: "/admin/users".to_string(),
            },
            permission_gate,
        ));

    let protected = Router::new()
        .nest("/admin/users", users_routes)
        .route("/admin/logout", post(routes::login::logout))
        .layer(axum::middleware::from_fn_with_state(
            GateState { auth },
            session_gate,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/admin/login", post(routes::login::login))
        .merge(protected)
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}
