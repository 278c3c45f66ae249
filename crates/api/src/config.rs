//! Injected configuration for the API process.
//!
//! Nothing here is ambient: the signing secret, role allow-list, and the
//! optional geolocation provider are read once and handed to the service
//! constructors. Tests build an [`AppConfig`] directly.

use std::time::Duration;

use gatehouse_auth::Role;

#[derive(Debug, Clone)]
pub struct GeoProviderConfig {
    pub endpoint: String,
    pub api_key: String,
    /// Upper bound on the whole provider exchange.
    pub deadline: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Shared signing secret for the token codec.
    pub jwt_secret: String,
    /// Optional token expiry; session superseding alone invalidates tokens
    /// when unset.
    pub token_ttl: Option<chrono::Duration>,
    /// Roles allowed to open a session on the admin surface.
    pub allowed_roles: Vec<Role>,
    /// Geolocation provider; logins record "Unknown" when absent.
    pub geo: Option<GeoProviderConfig>,
}

impl AppConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: None,
            allowed_roles: Role::admin_surface().to_vec(),
            geo: None,
        }
    }

    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let token_ttl = std::env::var("TOKEN_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .map(chrono::Duration::seconds);

        let geo = std::env::var("GEOIPIFY_API_KEY").ok().map(|api_key| {
            let endpoint = std::env::var("GEOIPIFY_ENDPOINT")
                .unwrap_or_else(|_| "https://geo.ipify.org/api/v2/country,city".to_string());
            let deadline = std::env::var("GEOIPIFY_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(Duration::from_secs(2));
            GeoProviderConfig {
                endpoint,
                api_key,
                deadline,
            }
        });

        Self {
            geo,
            token_ttl,
            ..Self::new(jwt_secret)
        }
    }
}
