//! HTTP surface for the gateway: routing, the request gate, and the
//! admin-panel collaborator handlers.

pub mod app;
pub mod config;
pub mod context;
pub mod error;
pub mod middleware;
pub mod routes;
