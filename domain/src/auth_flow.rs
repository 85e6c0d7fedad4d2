//! Login, callback, refresh and logout pipelines of the backend-to-backend example.
//!
//! Each function works on an [`AuthContext`] owned by the caller. On `Err` the
//! context is left exactly as it was, so callers persist it only on success.

use crate::auth_context::AuthContext;
use crate::error::{auth_error, AuthErrorKind, Error};
use kauth::oauth::token::TokenSet;
use kauth::oauth::{AntiForgeryState, PkceVerifier, Provider};
use log::*;

/// What K-Auth sent back to the callback URI.
#[derive(Debug, Clone, PartialEq)]
pub enum Callback {
    /// The user or the provider refused the authorization request.
    Denied {
        error: String,
        description: Option<String>,
    },
    /// An authorization code together with the echoed `state`.
    Code { code: String, state: Option<String> },
}

impl Callback {
    /// Classify raw callback query values. `error` wins over `code`.
    pub fn from_query(
        code: Option<String>,
        state: Option<String>,
        error: Option<String>,
        error_description: Option<String>,
    ) -> Result<Self, Error> {
        match (error, code) {
            (Some(error), _) => Ok(Callback::Denied {
                error,
                description: error_description,
            }),
            (None, Some(code)) => Ok(Callback::Code { code, state }),
            (None, None) => Err(auth_error(AuthErrorKind::MissingCode)),
        }
    }
}

/// Start a login: generate a PKCE pair and state, remember them, return the authorize URL.
pub fn begin_login(provider: &dyn Provider, ctx: &mut AuthContext) -> Result<String, Error> {
    let verifier = PkceVerifier::generate();
    let state = AntiForgeryState::generate();
    let url = provider.authorization_url(&verifier.challenge(), Some(&state))?;

    ctx.begin(verifier, state);
    debug!("Login started, awaiting authorization code");
    Ok(url)
}

/// Finish a login: guard on `state`, exchange the code, store the token set.
///
/// The token endpoint is only contacted once the returned `state` exactly
/// matches the stored one and a verifier is present.
pub async fn complete_login(
    provider: &dyn Provider,
    ctx: &mut AuthContext,
    callback: Callback,
) -> Result<(), Error> {
    let (code, returned_state) = match callback {
        Callback::Denied { error, description } => {
            warn!("K-Auth denied authorization: {error} {description:?}");
            return Err(auth_error(AuthErrorKind::AuthorizationDenied {
                error,
                description,
            }));
        }
        Callback::Code { code, state } => (code, state),
    };

    verify_state(ctx, returned_state.as_deref())?;

    let verifier = ctx.pending_verifier().ok_or_else(|| {
        warn!("Callback arrived without a stored PKCE verifier");
        auth_error(AuthErrorKind::MissingVerifier)
    })?;

    debug!("State verified, exchanging authorization code");
    let tokens = provider.exchange_code(&code, &verifier).await?;

    ctx.authenticate(tokens);
    info!("Login completed");
    Ok(())
}

fn verify_state(ctx: &AuthContext, returned: Option<&str>) -> Result<(), Error> {
    match (ctx.pending_state(), returned) {
        (Some(expected), Some(returned)) if expected.matches(returned) => Ok(()),
        _ => {
            warn!("Callback state does not match the session, possible CSRF");
            Err(auth_error(AuthErrorKind::StateMismatch))
        }
    }
}

/// Exchange the stored refresh token for a new token set and replace the old one in full.
pub async fn refresh_tokens(provider: &dyn Provider, ctx: &mut AuthContext) -> Result<TokenSet, Error> {
    let refresh_token = ctx
        .refresh_token()
        .ok_or_else(|| auth_error(AuthErrorKind::Unauthenticated))?
        .to_owned();

    let tokens = provider.refresh_token(&refresh_token).await?;
    ctx.replace_tokens(tokens.clone());
    Ok(tokens)
}

/// Revoke (best effort), clear the context, and return the provider logout URL.
///
/// The context is always cleared, even when revocation fails or building the
/// logout URL fails.
pub async fn logout(
    provider: &dyn Provider,
    ctx: &mut AuthContext,
    base_uri: &str,
) -> Result<String, Error> {
    if let Some(refresh_token) = ctx.refresh_token() {
        if let Err(e) = provider.revoke_token(refresh_token).await {
            warn!("Ignoring failed refresh token revocation during logout: {e}");
        }
    }

    ctx.clear();
    Ok(provider.logout_url(base_uri)?)
}
