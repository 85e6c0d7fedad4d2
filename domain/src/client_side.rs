//! Settings handed to the browser-resident example.
//!
//! The client-side example keeps its verifier and tokens in the browser and
//! calls K-Auth directly, so the only thing its host provides is where to go.

use kauth::oauth::CODE_CHALLENGE_METHOD;
use serde::Serialize;
use service::config::Config;

/// Registration and endpoint values the browser script needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSideSettings {
    pub client_id: String,
    pub redirect_uri: String,
    pub authorize_url: String,
    pub token_url: String,
    pub code_challenge_method: &'static str,
}

pub fn settings(config: &Config) -> ClientSideSettings {
    let endpoints = config.kauth_endpoints();
    ClientSideSettings {
        client_id: config.client_side_client_id().to_string(),
        redirect_uri: config.client_side_redirect_uri().to_string(),
        authorize_url: endpoints.authorize_url,
        token_url: endpoints.token_url,
        code_challenge_method: CODE_CHALLENGE_METHOD,
    }
}
