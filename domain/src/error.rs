//! Error types for the `domain` layer.
use kauth::error::{
    Error as KAuthError, ErrorKind as KAuthErrorKind, OAuthErrorKind as KAuthOAuthErrorKind,
};
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums. The `source` field holds the original error that caused the domain error.
/// `web` depends on `domain` but never on `kauth` directly, so provider errors are
/// translated here and `web` maps the resulting kinds to status codes and pages.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Auth(AuthErrorKind),
    Config,
    Session,
    Other(String),
}

/// Failures of the login, callback and refresh pipelines detected before or
/// instead of talking to K-Auth.
#[derive(Debug, PartialEq)]
pub enum AuthErrorKind {
    /// K-Auth redirected back with an `error` parameter.
    AuthorizationDenied {
        error: String,
        description: Option<String>,
    },
    /// Neither `code` nor `error` was present on the callback.
    MissingCode,
    /// Returned `state` differs from the one stored at login. Possible CSRF.
    StateMismatch,
    /// No verifier in the session, the flow was interrupted or never started.
    MissingVerifier,
    /// No token set or no refresh token in the session.
    Unauthenticated,
}

/// Enum representing the various kinds of external errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    Network,
    /// K-Auth answered with a non-success status; status and body are verbatim.
    Provider { status: u16, body: String },
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// This is where we translate errors from the `kauth` layer to the `domain` layer.
impl From<KAuthError> for Error {
    fn from(err: KAuthError) -> Self {
        let error_kind = match &err.error_kind {
            KAuthErrorKind::Http(_) => DomainErrorKind::External(ExternalErrorKind::Network),
            KAuthErrorKind::OAuth(KAuthOAuthErrorKind::ProviderRejected { status, body }) => {
                DomainErrorKind::External(ExternalErrorKind::Provider {
                    status: *status,
                    body: body.clone(),
                })
            }
            KAuthErrorKind::OAuth(KAuthOAuthErrorKind::InvalidResponse) => {
                DomainErrorKind::External(ExternalErrorKind::Other(
                    "Invalid response from K-Auth".to_string(),
                ))
            }
            KAuthErrorKind::OAuth(KAuthOAuthErrorKind::InvalidEndpoint) => {
                DomainErrorKind::Internal(InternalErrorKind::Config)
            }
        };
        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

/// Helper function to create auth pipeline errors.
pub fn auth_error(kind: AuthErrorKind) -> Error {
    Error {
        source: None,
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Auth(kind)),
    }
}
