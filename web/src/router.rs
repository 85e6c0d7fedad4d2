use crate::controller::{
    auth_controller, client_side_controller, health_check_controller, home_controller,
};
use crate::AppState;
use axum::{routing::get, Json, Router};
use service::config::Config;
use tower_http::services::ServeDir;
use utoipa::OpenApi;

/// Directory holding the page and script of the client-side example.
const CLIENT_SIDE_ASSETS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static/client_side");

// The OpenAPI document served at /api-docs/openapi.json. To be a part
// of it, a path must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "K-Auth backend-to-backend example"
        ),
        paths(
            home_controller::index,
            auth_controller::login,
            auth_controller::callback,
            auth_controller::refresh,
            auth_controller::logout,
            health_check_controller::health_check,
        ),
        tags(
            (name = "kauth_examples", description = "OAuth2 authorization code flow with PKCE against K-Auth")
        )
    )]
pub(crate) struct ApiDoc;

/// Routes of the backend-to-backend example. Session handling is layered on by the caller.
pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(home_routes(app_state.clone()))
        .merge(auth_routes(app_state))
        .merge(health_routes())
        .route("/api-docs/openapi.json", get(openapi))
}

fn home_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(home_controller::index))
        .with_state(app_state)
}

fn auth_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/login", get(auth_controller::login))
        .route("/callback", get(auth_controller::callback))
        .route(
            "/refresh",
            get(auth_controller::refresh).post(auth_controller::refresh),
        )
        .route("/logout", get(auth_controller::logout))
        .with_state(app_state)
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Routes of the static host for the client-side example.
pub fn client_side_routes(config: Config) -> Router {
    Router::new()
        .route("/config.json", get(client_side_controller::config))
        .with_state(config)
        .merge(health_routes())
        .fallback_service(static_routes())
}

pub fn static_routes() -> ServeDir {
    ServeDir::new(CLIENT_SIDE_ASSETS)
}
