//! K-Auth gateway.
//!
//! Builds the provider used by the backend-to-backend example from `Config`.

use crate::error::Error;
use ::kauth::oauth::providers::kauth::Provider as KAuthProvider;
use service::config::Config;

pub use ::kauth::oauth::Provider;

/// Create the K-Auth provider for the backend-to-backend client registration.
///
/// # Example
///
/// ```rust,ignore
/// use domain::gateway::kauth;
///
/// let provider = kauth::new_provider(&config)?;
/// ```
pub fn new_provider(config: &Config) -> Result<KAuthProvider, Error> {
    let provider = KAuthProvider::new(
        config.client_id().to_string(),
        config.redirect_uri().to_string(),
        config.kauth_endpoints(),
    )?
    .with_refresh_token_transport(config.refresh_token_transport);
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use ::kauth::oauth::{PkceVerifier, RefreshTokenTransport};

    #[test]
    fn test_new_provider_uses_configured_registration() {
        let config = Config::parse_from(["kauth_examples"]).set_kauth_url("https://auth.example.com");
        let provider = new_provider(&config).unwrap();

        assert_eq!(provider.endpoints(), &config.kauth_endpoints());
        let url = provider
            .authorization_url(&PkceVerifier::generate().challenge(), None)
            .unwrap();
        assert!(url.starts_with(
            "https://auth.example.com/oauth/authorize?client_id=backend-to-backend-example&redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fcallback"
        ));
    }

    #[tokio::test]
    async fn test_new_provider_honours_cookie_transport() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/oauth/refresh")
            .match_header("cookie", "refreshToken=rt1")
            .with_status(200)
            .with_body(r#"{"status":200,"data":{"accessToken":"at2"}}"#)
            .create_async()
            .await;

        let mut config = Config::parse_from(["kauth_examples"]).set_kauth_url(&server.url());
        config.refresh_token_transport = RefreshTokenTransport::Cookie;
        let provider = new_provider(&config).unwrap();

        provider.refresh_token("rt1").await.unwrap();
        mock.assert_async().await;
    }
}
