//! OAuth token types.

mod tokens;

pub use tokens::{RefreshTokenRequest, TokenExchangeRequest, TokenResponse, TokenSet};
