//! Best-effort geolocation enrichment for login history.
//!
//! The lookup is advisory: the login flow degrades any provider failure to
//! [`GeoSnapshot::unknown`] and proceeds. Implementations are expected to
//! bound their own network time (see the infra client).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Geolocation fields recorded alongside a login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoSnapshot {
    pub country: String,
    pub region: String,
    pub city: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub timezone: String,
}

impl GeoSnapshot {
    /// Placeholder snapshot written when the provider is unavailable.
    pub fn unknown() -> Self {
        Self {
            country: "Unknown".to_string(),
            region: "Unknown".to_string(),
            city: "Unknown".to_string(),
            lat: None,
            lon: None,
            timezone: "Unknown".to_string(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self == &Self::unknown()
    }
}

impl Default for GeoSnapshot {
    fn default() -> Self {
        Self::unknown()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeoError {
    #[error("provider unreachable: {0}")]
    Unreachable(String),

    #[error("provider timed out")]
    Timeout,

    #[error("malformed provider response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait GeoLookup: Send + Sync {
    /// Resolve a source address to a location snapshot.
    ///
    /// Callers treat any error as "unknown location"; errors must never
    /// propagate into the login failure path.
    async fn lookup(&self, ip: &str) -> Result<GeoSnapshot, GeoError>;
}

/// Lookup used when no provider is configured: always unknown.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGeoLookup;

#[async_trait]
impl GeoLookup for NoGeoLookup {
    async fn lookup(&self, _ip: &str) -> Result<GeoSnapshot, GeoError> {
        Ok(GeoSnapshot::unknown())
    }
}
