use std::net::SocketAddr;
use std::sync::Arc;

use gatehouse_api::app::{build_app, geo_lookup};
use gatehouse_api::config::AppConfig;
use gatehouse_auth::{Action, CredentialStore, Grant, Role, User, password};
use gatehouse_infra::{InMemoryGrantStore, InMemoryUserStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    gatehouse_observability::init();

    let config = AppConfig::from_env();

    let users = Arc::new(InMemoryUserStore::new());
    bootstrap_admin(&users).await?;

    let grants = Arc::new(InMemoryGrantStore::with_grants(default_grants()));
    let geo = geo_lookup(&config);

    let app = build_app(&config, users, grants, geo);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Seed one superAdmin so a fresh in-memory deployment is reachable.
async fn bootstrap_admin(users: &Arc<InMemoryUserStore>) -> anyhow::Result<()> {
    let email =
        std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());
    let phone = std::env::var("ADMIN_PHONE").unwrap_or_else(|_| "+10000000000".to_string());
    let password_plain = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        tracing::warn!("ADMIN_PASSWORD not set; using insecure dev default");
        "change-me-now".to_string()
    });

    let hash = password::hash_password(&password_plain)?;
    let admin = User::new("Boot", "Admin", &email, &phone, hash, Role::SuperAdmin)?;

    users.insert(admin).await?;
    tracing::info!(%email, "bootstrap admin seeded");
    Ok(())
}

/// Default permission table: every admin role can read the users listing,
/// superAdmin owns the full action set.
fn default_grants() -> Vec<Grant> {
    let mut grants: Vec<Grant> = Role::admin_surface()
        .iter()
        .map(|&role| Grant::new(role, "/admin/users", Action::Read))
        .collect();

    for action in [Action::Create, Action::Update, Action::Delete] {
        grants.push(Grant::new(Role::SuperAdmin, "/admin/users", action));
    }
    grants
}
