//! OAuth provider trait.

use async_trait::async_trait;

use super::token::TokenSet;
use super::{AntiForgeryState, PkceChallenge, PkceVerifier};
use crate::error::Error;

/// Trait for the identity provider a client is registered with.
///
/// Implementations own the client registration (client id, redirect URI)
/// and make one-shot calls: no retry, no custom timeout.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Generate the authorization URL for the given challenge and optional state.
    fn authorization_url(
        &self,
        challenge: &PkceChallenge,
        state: Option<&AntiForgeryState>,
    ) -> Result<String, Error>;

    /// URL of the provider logout page, returning the browser to `base_uri`.
    fn logout_url(&self, base_uri: &str) -> Result<String, Error>;

    /// Exchange an authorization code and its PKCE verifier for a token set.
    async fn exchange_code(&self, code: &str, verifier: &PkceVerifier)
        -> Result<TokenSet, Error>;

    /// Obtain a fresh token set with a refresh token.
    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenSet, Error>;

    /// Revoke a refresh token.
    async fn revoke_token(&self, refresh_token: &str) -> Result<(), Error>;
}
