use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use domain::auth_context::AuthContext;
use domain::error::{DomainErrorKind, Error as DomainError, InternalErrorKind};
use log::*;
use tower_sessions::Session;

use crate::error::{session_error, Error};

/// The `AuthContext` of the current browser session, loaded from the session
/// store. Handlers mutate `auth` and call [`SessionContext::save`] on success.
pub(crate) struct SessionContext {
    session: Session,
    pub auth: AuthContext,
}

impl SessionContext {
    pub async fn load(session: Session) -> Result<Self, DomainError> {
        let auth = session
            .get::<AuthContext>(AuthContext::SESSION_KEY)
            .await
            .map_err(session_error)?
            .unwrap_or_default();
        Ok(Self { session, auth })
    }

    pub async fn save(&self) -> Result<(), DomainError> {
        self.session
            .insert(AuthContext::SESSION_KEY, &self.auth)
            .await
            .map_err(session_error)
    }

    /// Issue a new session id, keeping the stored data.
    pub async fn cycle_id(&self) -> Result<(), DomainError> {
        self.session.cycle_id().await.map_err(session_error)
    }

    /// Delete the session from the store and expire its cookie.
    pub async fn destroy(mut self) -> Result<(), DomainError> {
        self.auth.clear();
        self.session.flush().await.map_err(session_error)
    }
}

impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, message)| {
                error!("Session unavailable: {message}");
                DomainError {
                    source: None,
                    error_kind: DomainErrorKind::Internal(InternalErrorKind::Session),
                }
            })?;

        Ok(Self::load(session).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::IntoResponse,
        routing::get,
        Router,
    };
    use domain::TokenSet;
    use tower::ServiceExt;
    use tower_sessions::{MemoryStore, SessionManagerLayer};

    async fn store_tokens(mut ctx: SessionContext) -> crate::Result<impl IntoResponse> {
        ctx.auth
            .authenticate(TokenSet::new("at1", Some("rt1".to_string())));
        ctx.save().await?;
        Ok(StatusCode::OK)
    }

    async fn read_tokens(ctx: SessionContext) -> String {
        ctx.auth
            .tokens
            .map(|tokens| tokens.access_token)
            .unwrap_or_else(|| "none".to_string())
    }

    fn app() -> Router {
        Router::new()
            .route("/store", get(store_tokens))
            .route("/read", get(read_tokens))
            .layer(SessionManagerLayer::new(MemoryStore::default()).with_secure(false))
    }

    #[tokio::test]
    async fn test_context_round_trips_through_the_session_store() {
        let app = app();

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/store").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers()[header::SET_COOKIE]
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/read")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"at1");
    }

    #[tokio::test]
    async fn test_new_session_starts_with_an_empty_context() {
        let response = app()
            .oneshot(Request::builder().uri("/read").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"none");
    }

    #[tokio::test]
    async fn test_missing_session_layer_is_an_internal_error() {
        let app = Router::new().route("/read", get(read_tokens));
        let response = app
            .oneshot(Request::builder().uri("/read").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
