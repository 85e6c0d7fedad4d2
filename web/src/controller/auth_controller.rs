//! Login, callback, refresh and logout routes of the backend-to-backend example.
//!
//! The browser navigates to these routes, so failures render an HTML page,
//! except `/refresh` which is called for its JSON.

use crate::controller::ApiResponse;
use crate::error::JsonError;
use crate::extractors::session_context::SessionContext;
use crate::params::callback::CallbackParams;
use crate::{AppState, Error};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect};
use axum::Json;
use domain::auth_flow::{self, Callback};
use log::*;
use tower_sessions::Session;

/// GET start a login
///
/// Generates a PKCE verifier and anti-forgery state, stores both in the session
/// and redirects the browser to the K-Auth authorization endpoint.
#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 303, description = "Redirect to the K-Auth authorization endpoint"),
        (status = 500, description = "Internal Server Error"),
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    mut ctx: SessionContext,
) -> Result<impl IntoResponse, Error> {
    let url = auth_flow::begin_login(app_state.provider_ref(), &mut ctx.auth)?;
    ctx.save().await?;

    Ok(Redirect::to(&url))
}

/// GET the redirect target registered with K-Auth
///
/// Verifies `state`, exchanges `code` and the stored verifier for a token set
/// and redirects home. The session is only written when every step succeeds.
#[utoipa::path(
    get,
    path = "/callback",
    params(CallbackParams),
    responses(
        (status = 303, description = "Logged in, redirect to the home page"),
        (status = 400, description = "Missing code or no login in progress"),
        (status = 401, description = "K-Auth denied the authorization request"),
        (status = 403, description = "State does not match the session"),
        (status = 502, description = "K-Auth could not be reached"),
    )
)]
pub async fn callback(
    State(app_state): State<AppState>,
    mut ctx: SessionContext,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, Error> {
    let callback = Callback::try_from(params)?;
    auth_flow::complete_login(app_state.provider_ref(), &mut ctx.auth, callback).await?;

    ctx.cycle_id().await?;
    ctx.save().await?;

    Ok(Redirect::to("/"))
}

/// GET exchange the stored refresh token for a new token set
///
/// Responds with the new token set. K-Auth failures are passed through with
/// their original status and body.
#[utoipa::path(
    get,
    path = "/refresh",
    responses(
        (status = 200, description = "The new token set"),
        (status = 401, description = "No refresh token in the session, or K-Auth rejected it"),
        (status = 502, description = "K-Auth could not be reached"),
    )
)]
pub async fn refresh(
    State(app_state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, JsonError> {
    let mut ctx = SessionContext::load(session).await?;

    let tokens = auth_flow::refresh_tokens(app_state.provider_ref(), &mut ctx.auth).await?;
    ctx.save().await?;

    debug!("Token set refreshed");
    Ok(Json(ApiResponse::new(StatusCode::OK.into(), tokens)))
}

/// GET log out
///
/// Revokes the refresh token when there is one, destroys the session and
/// redirects to the K-Auth logout page.
#[utoipa::path(
    get,
    path = "/logout",
    responses(
        (status = 303, description = "Redirect to the K-Auth logout page"),
        (status = 500, description = "Internal Server Error"),
    )
)]
pub async fn logout(
    State(app_state): State<AppState>,
    mut ctx: SessionContext,
) -> Result<impl IntoResponse, Error> {
    let result = auth_flow::logout(
        app_state.provider_ref(),
        &mut ctx.auth,
        app_state.config.base_uri(),
    )
    .await;

    if let Err(e) = ctx.destroy().await {
        error!("Failed to destroy session during logout: {e}");
    }

    let url = result?;
    info!("Logged out");
    Ok(Redirect::to(&url))
}
