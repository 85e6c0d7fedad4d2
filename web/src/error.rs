use std::error::Error as StdError;

use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use domain::error::{
    AuthErrorKind, DomainErrorKind, Error as DomainError, ExternalErrorKind, InternalErrorKind,
};

use crate::pages::ErrorPage;

use log::*;

pub type Result<T> = core::result::Result<T, Error>;

/// Error rendered as an HTML page, for routes the browser navigates to.
#[derive(Debug)]
pub struct Error(DomainError);

/// The same errors rendered as JSON, for routes called programmatically.
#[derive(Debug)]
pub struct JsonError(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

/// Wrap a session store failure.
pub(crate) fn session_error(err: tower_sessions::session::Error) -> DomainError {
    DomainError {
        source: Some(Box::new(err)),
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Session),
    }
}

/// HTTP status for a domain error. Provider statuses are passed through verbatim.
fn status_code(error_kind: &DomainErrorKind) -> StatusCode {
    match error_kind {
        DomainErrorKind::Internal(internal_error_kind) => match internal_error_kind {
            InternalErrorKind::Auth(auth_error_kind) => match auth_error_kind {
                AuthErrorKind::AuthorizationDenied { .. } => StatusCode::UNAUTHORIZED,
                AuthErrorKind::MissingCode => StatusCode::BAD_REQUEST,
                AuthErrorKind::StateMismatch => StatusCode::FORBIDDEN,
                AuthErrorKind::MissingVerifier => StatusCode::BAD_REQUEST,
                AuthErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
            },
            InternalErrorKind::Config
            | InternalErrorKind::Session
            | InternalErrorKind::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        },
        DomainErrorKind::External(external_error_kind) => match external_error_kind {
            ExternalErrorKind::Provider { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ExternalErrorKind::Network | ExternalErrorKind::Other(_) => StatusCode::BAD_GATEWAY,
        },
    }
}

/// Short title and longer detail shown to the user.
fn describe(error_kind: &DomainErrorKind) -> (&'static str, String) {
    match error_kind {
        DomainErrorKind::Internal(InternalErrorKind::Auth(auth_error_kind)) => {
            match auth_error_kind {
                AuthErrorKind::AuthorizationDenied { error, description } => (
                    "Authorization denied",
                    match description {
                        Some(description) => format!("{error}: {description}"),
                        None => error.clone(),
                    },
                ),
                AuthErrorKind::MissingCode => (
                    "Invalid callback",
                    "The callback did not include an authorization code.".to_string(),
                ),
                AuthErrorKind::StateMismatch => (
                    "State mismatch",
                    "The state returned by K-Auth does not match this session. \
                     The request may have been forged; please log in again."
                        .to_string(),
                ),
                AuthErrorKind::MissingVerifier => (
                    "Login interrupted",
                    "No login is in progress for this session; please log in again.".to_string(),
                ),
                AuthErrorKind::Unauthenticated => (
                    "Not authenticated",
                    "There is no refresh token in this session.".to_string(),
                ),
            }
        }
        DomainErrorKind::Internal(_) => (
            "Internal error",
            "Something went wrong on our side.".to_string(),
        ),
        DomainErrorKind::External(ExternalErrorKind::Provider { status, body }) => {
            ("K-Auth error", format!("K-Auth responded {status}: {body}"))
        }
        DomainErrorKind::External(ExternalErrorKind::Network) => (
            "K-Auth unreachable",
            "Could not reach K-Auth.".to_string(),
        ),
        DomainErrorKind::External(ExternalErrorKind::Other(detail)) => {
            ("K-Auth error", detail.clone())
        }
    }
}

fn log_error(err: &DomainError) {
    match &err.error_kind {
        DomainErrorKind::Internal(InternalErrorKind::Auth(_)) => warn!("{err}"),
        _ => error!("{err}"),
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        log_error(&self.0);
        let status = status_code(&self.0.error_kind);
        let (title, detail) = describe(&self.0.error_kind);

        match (ErrorPage { title, detail }).render_html() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(render_error) => {
                error!("Failed to render error page: {render_error}");
                (status, title).into_response()
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct ApiError {
    status_code: u16,
    error: &'static str,
    detail: String,
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        log_error(&self.0);
        let status = status_code(&self.0.error_kind);

        // Provider failures are surfaced exactly as K-Auth sent them.
        if let DomainErrorKind::External(ExternalErrorKind::Provider { body, .. }) =
            &self.0.error_kind
        {
            let content_type = if serde_json::from_str::<serde_json::Value>(body).is_ok() {
                "application/json"
            } else {
                "text/plain; charset=utf-8"
            };
            return (status, [(header::CONTENT_TYPE, content_type)], body.clone()).into_response();
        }

        let (error, detail) = describe(&self.0.error_kind);
        let body = ApiError {
            status_code: status.as_u16(),
            error,
            detail,
        };
        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl<E> From<E> for JsonError
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use domain::error::auth_error;

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn provider_error(status: u16, body: &str) -> DomainError {
        DomainError {
            source: None,
            error_kind: DomainErrorKind::External(ExternalErrorKind::Provider {
                status,
                body: body.to_string(),
            }),
        }
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (auth_error(AuthErrorKind::StateMismatch), StatusCode::FORBIDDEN),
            (auth_error(AuthErrorKind::MissingVerifier), StatusCode::BAD_REQUEST),
            (auth_error(AuthErrorKind::Unauthenticated), StatusCode::UNAUTHORIZED),
            (provider_error(429, ""), StatusCode::TOO_MANY_REQUESTS),
            (provider_error(99, ""), StatusCode::BAD_GATEWAY),
        ];
        for (err, expected) in cases {
            assert_eq!(status_code(&err.error_kind), expected);
        }
    }

    #[tokio::test]
    async fn test_state_mismatch_page() {
        let response = Error::from(auth_error(AuthErrorKind::StateMismatch)).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = body_string(response).await;
        assert!(body.contains("State mismatch"));
    }

    #[tokio::test]
    async fn test_error_page_escapes_provider_detail() {
        let err = auth_error(AuthErrorKind::AuthorizationDenied {
            error: "access_denied".to_string(),
            description: Some("<script>alert(1)</script>".to_string()),
        });
        let body = body_string(Error::from(err).into_response()).await;
        assert!(body.contains("access_denied"));
        assert!(!body.contains("<script>alert(1)</script>"));
    }

    #[tokio::test]
    async fn test_json_error_passes_provider_body_through() {
        let response =
            JsonError::from(provider_error(401, r#"{"message":"expired"}"#)).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        assert_eq!(body_string(response).await, r#"{"message":"expired"}"#);
    }

    #[tokio::test]
    async fn test_json_error_for_unauthenticated() {
        let response =
            JsonError::from(auth_error(AuthErrorKind::Unauthenticated)).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["status_code"], 401);
        assert_eq!(body["error"], "Not authenticated");
    }
}
