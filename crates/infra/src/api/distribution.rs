//! Distribution info client
//!
//! Retrieves the post-login distribution configuration with the persisted
//! session's access token. The flow only consumes success/failure; the
//! payload itself is handed on untouched.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lingoarc_core::login::ports::{DistributionInfoProvider, SessionStore};
use lingoarc_domain::constants::{DEFAULT_API_BASE_URL, HTTP_TIMEOUT_SECS};
use lingoarc_domain::{DistributionInfo, LingoArcError, Result};
use reqwest::Client;
use tracing::debug;

/// HTTP client for the distribution metadata endpoint
///
/// The access token is read through the injected session store at call
/// time, so the client always authenticates with the current session.
pub struct DistributionInfoClient {
    http: Client,
    base_url: String,
    sessions: Arc<dyn SessionStore>,
}

impl DistributionInfoClient {
    /// Create a client against the production API
    #[must_use]
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { http, base_url: DEFAULT_API_BASE_URL.to_string(), sessions }
    }

    /// Override the API base URL (self-hosted deployments, tests)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch the distribution configuration for the current session
    ///
    /// # Errors
    /// Returns `LingoArcError::Auth` when no session is persisted and
    /// `LingoArcError::Network` on transport failure, non-success status, or
    /// an unparseable body.
    pub async fn fetch(&self) -> Result<DistributionInfo> {
        let session = self
            .sessions
            .load()
            .await?
            .ok_or_else(|| LingoArcError::Auth("no persisted session".to_string()))?;

        let url = format!("{}/distributions/metadata", self.base_url);
        debug!(url = %url, "fetching distribution info");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&session.access_token)
            .send()
            .await
            .map_err(|e| LingoArcError::Network(format!("distribution request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LingoArcError::Network(format!(
                "distribution endpoint returned status {status}"
            )));
        }

        response
            .json::<DistributionInfo>()
            .await
            .map_err(|e| LingoArcError::Network(format!("failed to parse distribution info: {e}")))
    }
}

#[async_trait]
impl DistributionInfoProvider for DistributionInfoClient {
    async fn fetch(&self) -> Result<DistributionInfo> {
        self.fetch().await
    }
}
