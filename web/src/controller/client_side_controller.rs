use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use service::config::Config;

/// GET the settings document read by the client-side example on start-up
#[utoipa::path(
    get,
    path = "/config.json",
    responses(
        (status = 200, description = "Client id, redirect URI and K-Auth endpoints for the browser"),
    )
)]
pub async fn config(State(config): State<Config>) -> impl IntoResponse {
    Json(domain::client_side::settings(&config))
}
