//! K-Auth endpoint set and the browser-facing URLs built from it.

use std::fmt;
use std::str::FromStr;

use url::Url;

use super::{AntiForgeryState, PkceChallenge};
use crate::error::Error;

/// The only challenge method K-Auth is asked to use.
pub const CODE_CHALLENGE_METHOD: &str = "S256";

/// Name of the cookie used by [`RefreshTokenTransport::Cookie`].
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Absolute URLs of the provider endpoints used by both examples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub authorize_url: String,
    pub token_url: String,
    pub refresh_url: String,
    pub revoke_url: String,
    pub logout_url: String,
}

impl Endpoints {
    /// Build the authorization redirect URL.
    ///
    /// `state` is only sent by the backend-to-backend flow. Values are
    /// URL-encoded but otherwise passed through as given.
    pub fn authorization_url(
        &self,
        client_id: &str,
        redirect_uri: &str,
        challenge: &PkceChallenge,
        state: Option<&AntiForgeryState>,
    ) -> Result<String, Error> {
        let mut url = Url::parse(&self.authorize_url)?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("client_id", client_id)
                .append_pair("redirect_uri", redirect_uri)
                .append_pair("code_challenge", challenge.as_str())
                .append_pair("code_challenge_method", CODE_CHALLENGE_METHOD);
            if let Some(state) = state {
                query.append_pair("state", state.as_str());
            }
        }
        Ok(url.into())
    }

    /// Build the provider logout URL that sends the browser back to `base_uri`.
    pub fn logout_redirect_url(&self, base_uri: &str) -> Result<String, Error> {
        let url = Url::parse_with_params(&self.logout_url, &[("redirect_uri", base_uri)])?;
        Ok(url.into())
    }
}

/// How the refresh token travels to the refresh and revoke endpoints.
///
/// `Body` is the contract. `Cookie` works around the counterpart server
/// currently reading the token from a `refreshToken` cookie and should go
/// away once the server accepts the body form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RefreshTokenTransport {
    #[default]
    Body,
    Cookie,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RefreshTokenTransportParseError;

impl fmt::Display for RefreshTokenTransportParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "expected one of: body, cookie")
    }
}

impl std::error::Error for RefreshTokenTransportParseError {}

impl FromStr for RefreshTokenTransport {
    type Err = RefreshTokenTransportParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "body" => Ok(RefreshTokenTransport::Body),
            "cookie" => Ok(RefreshTokenTransport::Cookie),
            _ => Err(RefreshTokenTransportParseError),
        }
    }
}

impl fmt::Display for RefreshTokenTransport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RefreshTokenTransport::Body => write!(f, "body"),
            RefreshTokenTransport::Cookie => write!(f, "cookie"),
        }
    }
}
