//! Token exchange client
//!
//! Performs the HTTP exchange of an authorization code for an access token
//! against the authorization server's token endpoint.

use std::time::Duration;

use async_trait::async_trait;
use lingoarc_core::login::ports::TokenExchanger;
use lingoarc_domain::constants::HTTP_TIMEOUT_SECS;
use lingoarc_domain::{AuthConfig, LingoArcError, Result, TokenRequest, TokenResponse};
use reqwest::Client;
use tracing::debug;

/// HTTP client for the token endpoint
///
/// A usable token requires both a success status and a parseable body;
/// transport failures, non-success statuses, and unparseable bodies all
/// surface as errors that the flow treats uniformly.
#[derive(Debug, Clone)]
pub struct TokenExchangeClient {
    http: Client,
    token_url: String,
}

impl TokenExchangeClient {
    /// Create a client targeting the configured authorization server
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { http, token_url: config.token_url() }
    }

    /// Override the token endpoint URL (self-hosted deployments, tests)
    #[must_use]
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Exchange an authorization code for a token response
    ///
    /// # Arguments
    /// * `request` - JSON body of the exchange (grant, credentials, code)
    /// * `organization_domain` - `domain` query parameter for enterprise
    ///   accounts
    ///
    /// # Errors
    /// Returns `LingoArcError::Network` on transport failure and
    /// `LingoArcError::Auth` on a non-success status or unparseable body.
    pub async fn exchange(
        &self,
        request: &TokenRequest,
        organization_domain: Option<&str>,
    ) -> Result<TokenResponse> {
        debug!("exchanging authorization code for tokens");

        let mut call = self.http.post(&self.token_url).json(request);
        if let Some(domain) = organization_domain {
            call = call.query(&[("domain", domain)]);
        }

        let response = call
            .send()
            .await
            .map_err(|e| LingoArcError::Network(format!("token request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                format!("token endpoint returned status {status}")
            } else {
                format!("token endpoint returned status {status}: {body}")
            };
            return Err(LingoArcError::Auth(message));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| LingoArcError::Auth(format!("failed to parse token response: {e}")))
    }
}

#[async_trait]
impl TokenExchanger for TokenExchangeClient {
    async fn exchange(
        &self,
        request: &TokenRequest,
        organization_domain: Option<&str>,
    ) -> Result<TokenResponse> {
        self.exchange(request, organization_domain).await
    }
}
