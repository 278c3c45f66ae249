//! Geolocation client for the ipify "country,city" endpoint.
//!
//! The whole exchange is bounded by a timeout; the caller (login
//! orchestration) degrades any error to the Unknown snapshot, so nothing
//! here may hang a login.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::time::timeout;

use gatehouse_auth::{GeoError, GeoLookup, GeoSnapshot};

pub struct GeoIpifyClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    deadline: Duration,
}

impl GeoIpifyClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, deadline: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            deadline,
        }
    }
}

#[derive(Debug, Deserialize)]
struct IpifyResponse {
    location: Option<IpifyLocation>,
}

#[derive(Debug, Deserialize)]
struct IpifyLocation {
    country: Option<String>,
    region: Option<String>,
    city: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
    timezone: Option<String>,
}

fn field(value: Option<String>) -> String {
    match value {
        Some(s) if !s.is_empty() => s,
        _ => "Unknown".to_string(),
    }
}

#[async_trait]
impl GeoLookup for GeoIpifyClient {
    async fn lookup(&self, ip: &str) -> Result<GeoSnapshot, GeoError> {
        let request = self
            .http
            .get(&self.endpoint)
            .query(&[("apiKey", self.api_key.as_str()), ("ipAddress", ip)])
            .send();

        let response = timeout(self.deadline, request)
            .await
            .map_err(|_| GeoError::Timeout)?
            .map_err(|e| GeoError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GeoError::Unreachable(format!(
                "provider returned {}",
                response.status()
            )));
        }

        let body: IpifyResponse = timeout(self.deadline, response.json())
            .await
            .map_err(|_| GeoError::Timeout)?
            .map_err(|e| GeoError::Malformed(e.to_string()))?;

        let Some(loc) = body.location else {
            return Err(GeoError::Malformed("missing location object".to_string()));
        };

        Ok(GeoSnapshot {
            country: field(loc.country),
            region: field(loc.region),
            city: field(loc.city),
            lat: loc.lat,
            lon: loc.lng,
            timezone: field(loc.timezone),
        })
    }
}
