//! K-Auth OAuth provider implementation.

use async_trait::async_trait;
use log::*;
use reqwest::header::COOKIE;
use reqwest::{RequestBuilder, Response};

use crate::error::{provider_rejected, Error, ErrorKind, OAuthErrorKind};
use crate::oauth::token::{RefreshTokenRequest, TokenExchangeRequest, TokenResponse, TokenSet};
use crate::oauth::{
    AntiForgeryState, Endpoints, PkceChallenge, PkceVerifier, RefreshTokenTransport,
    REFRESH_TOKEN_COOKIE,
};

/// K-Auth provider for a single public (PKCE) client registration.
pub struct Provider {
    client_id: String,
    redirect_uri: String,
    endpoints: Endpoints,
    refresh_token_transport: RefreshTokenTransport,
    http_client: reqwest::Client,
}

impl Provider {
    /// Create a new K-Auth provider.
    ///
    /// # Arguments
    ///
    /// * `client_id` - Client identifier registered with K-Auth
    /// * `redirect_uri` - Callback URI registered for the client
    /// * `endpoints` - Provider endpoint URLs
    pub fn new(client_id: String, redirect_uri: String, endpoints: Endpoints) -> Result<Self, Error> {
        let http_client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client_id,
            redirect_uri,
            endpoints,
            refresh_token_transport: RefreshTokenTransport::default(),
            http_client,
        })
    }

    /// Choose how the refresh token reaches the refresh and revoke endpoints.
    pub fn with_refresh_token_transport(mut self, transport: RefreshTokenTransport) -> Self {
        self.refresh_token_transport = transport;
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn attach_refresh_token(&self, request: RequestBuilder, refresh_token: &str) -> RequestBuilder {
        match self.refresh_token_transport {
            RefreshTokenTransport::Body => request.json(&RefreshTokenRequest { refresh_token }),
            RefreshTokenTransport::Cookie => {
                request.header(COOKIE, format!("{REFRESH_TOKEN_COOKIE}={refresh_token}"))
            }
        }
    }

    /// Turn a provider response into a token set, keeping non-success bodies verbatim.
    async fn token_set_from(response: Response, operation: &str) -> Result<TokenSet, Error> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("K-Auth {operation} failed with {status}: {body}");
            return Err(provider_rejected(status.as_u16(), body));
        }

        let envelope: TokenResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse K-Auth {operation} response: {:?}", e);
            Error {
                source: Some(Box::new(e)),
                error_kind: ErrorKind::OAuth(OAuthErrorKind::InvalidResponse),
            }
        })?;
        debug!("K-Auth {operation} succeeded with status {:?}", envelope.status);
        Ok(envelope.data)
    }
}

#[async_trait]
impl crate::oauth::Provider for Provider {
    fn authorization_url(
        &self,
        challenge: &PkceChallenge,
        state: Option<&AntiForgeryState>,
    ) -> Result<String, Error> {
        self.endpoints
            .authorization_url(&self.client_id, &self.redirect_uri, challenge, state)
    }

    fn logout_url(&self, base_uri: &str) -> Result<String, Error> {
        self.endpoints.logout_redirect_url(base_uri)
    }

    async fn exchange_code(&self, code: &str, verifier: &PkceVerifier) -> Result<TokenSet, Error> {
        let request = TokenExchangeRequest {
            client_id: &self.client_id,
            redirect_uri: &self.redirect_uri,
            code,
            code_verifier: verifier.as_str(),
        };

        debug!("Exchanging K-Auth authorization code for tokens");

        let response = self
            .http_client
            .post(&self.endpoints.token_url)
            .json(&request)
            .send()
            .await
            .inspect_err(|e| warn!("Failed to reach K-Auth token endpoint: {:?}", e))?;

        let tokens = Self::token_set_from(response, "code exchange").await?;
        info!("Successfully exchanged K-Auth authorization code for tokens");
        Ok(tokens)
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenSet, Error> {
        debug!(
            "Refreshing K-Auth tokens (transport: {})",
            self.refresh_token_transport
        );

        let request = self.http_client.post(&self.endpoints.refresh_url);
        let response = self
            .attach_refresh_token(request, refresh_token)
            .send()
            .await
            .inspect_err(|e| warn!("Failed to reach K-Auth refresh endpoint: {:?}", e))?;

        let tokens = Self::token_set_from(response, "token refresh").await?;
        info!("Successfully refreshed K-Auth tokens");
        Ok(tokens)
    }

    async fn revoke_token(&self, refresh_token: &str) -> Result<(), Error> {
        let request = self.http_client.post(&self.endpoints.revoke_url);
        let response = self
            .attach_refresh_token(request, refresh_token)
            .send()
            .await
            .inspect_err(|e| warn!("Failed to reach K-Auth revoke endpoint: {:?}", e))?;

        let status = response.status();
        if status.is_success() {
            info!("Revoked K-Auth refresh token");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            warn!("K-Auth revoke failed with {status}: {body}");
            Err(provider_rejected(status.as_u16(), body))
        }
    }
}
