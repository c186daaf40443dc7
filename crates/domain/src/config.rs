//! Authentication configuration
//!
//! Immutable OAuth client configuration supplied once at flow start by the
//! embedding application.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_AUTH_HOST, DEFAULT_REDIRECT_URI};

/// OAuth client configuration for the authorization-code flow
///
/// `auth_host` and `redirect_uri` default to the production authorization
/// server and the SDK's custom URI scheme; both can be overridden for
/// self-hosted or test deployments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// OAuth client ID
    pub client_id: String,

    /// OAuth client secret (confidential client)
    pub client_secret: String,

    /// Organization name for enterprise accounts
    ///
    /// When set, authorization and token requests carry a `domain` parameter
    /// scoping them to the organization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,

    /// Authorization server host (e.g., "accounts.lingoarc.com")
    #[serde(default = "default_auth_host")]
    pub auth_host: String,

    /// Redirect URI the authorization server sends the code back to
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,
}

fn default_auth_host() -> String {
    DEFAULT_AUTH_HOST.to_string()
}

fn default_redirect_uri() -> String {
    DEFAULT_REDIRECT_URI.to_string()
}

impl AuthConfig {
    /// Create a new configuration with default endpoints
    #[must_use]
    pub fn new(
        client_id: String,
        client_secret: String,
        organization_name: Option<String>,
    ) -> Self {
        Self {
            client_id,
            client_secret,
            organization_name,
            auth_host: default_auth_host(),
            redirect_uri: default_redirect_uri(),
        }
    }

    /// Override the authorization server host
    #[must_use]
    pub fn with_auth_host(mut self, auth_host: impl Into<String>) -> Self {
        self.auth_host = auth_host.into();
        self
    }

    /// Override the redirect URI
    #[must_use]
    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = redirect_uri.into();
        self
    }

    /// Get the authorization URL
    #[must_use]
    pub fn authorize_url(&self) -> String {
        format!("https://{}/oauth/authorize", self.auth_host)
    }

    /// Get the token URL
    #[must_use]
    pub fn token_url(&self) -> String {
        format!("https://{}/oauth/token", self.auth_host)
    }
}
