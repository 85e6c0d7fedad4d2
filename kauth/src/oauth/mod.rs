//! OAuth 2.0 authorization-code + PKCE building blocks for K-Auth.

mod endpoints;
mod pkce;
mod provider;
mod state;

pub mod providers;
pub mod token;

pub use endpoints::{
    Endpoints, RefreshTokenTransport, RefreshTokenTransportParseError, CODE_CHALLENGE_METHOD,
    REFRESH_TOKEN_COOKIE,
};
pub use pkce::{PkceChallenge, PkceVerifier};
pub use provider::Provider;
pub use state::AntiForgeryState;
