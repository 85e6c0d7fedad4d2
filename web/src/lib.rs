//! HTTP surface of the K-Auth examples: the backend-to-backend server and the
//! static host of the client-side example.

use axum::Router;
use log::*;
use service::config::Config;
use tokio::net::TcpListener;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

pub use self::error::{Error, JsonError, Result};
pub use service::AppState;

mod controller;
mod error;
mod extractors;
mod pages;
mod params;
mod router;

/// Session layer of the backend-to-backend example.
///
/// `SameSite=Lax` so the cookie survives K-Auth's cross-site redirect back to
/// `/callback`. The cookie is only marked `Secure` in production.
pub fn session_layer(config: &Config) -> SessionManagerLayer<MemoryStore> {
    let expiry_seconds = i64::try_from(config.session_expiry_seconds).unwrap_or(i64::MAX);

    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.is_production())
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::seconds(expiry_seconds)))
}

pub fn backend_app(app_state: AppState) -> Router {
    let session_layer = session_layer(&app_state.config);
    router::define_routes(app_state).layer(session_layer)
}

pub fn client_side_app(config: Config) -> Router {
    router::client_side_routes(config)
}

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let addr = format!("{}:{}", app_state.config.interface(), app_state.config.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Backend-to-backend example listening on http://{addr}");
    info!(
        "Using K-Auth at {}",
        app_state.config.kauth_endpoints().authorize_url
    );

    axum::serve(listener, backend_app(app_state)).await
}

pub async fn init_client_side_server(config: Config) -> std::io::Result<()> {
    let addr = format!("{}:{}", config.interface(), config.client_side_port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Client-side example hosted on http://{addr}");

    axum::serve(listener, client_side_app(config)).await
}
