//! `gatehouse-infra` — collaborator implementations for the auth core:
//! in-memory credential/grant stores and the geolocation provider client.

pub mod geoip;
pub mod grant_store;
pub mod user_store;


pub use geoip::GeoIpifyClient;
pub use grant_store::InMemoryGrantStore;
pub use user_store::InMemoryUserStore;
