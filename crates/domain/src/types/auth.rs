//! OAuth token request/response types and the persisted session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::constants::GRANT_TYPE_AUTHORIZATION_CODE;

/// Token exchange request body
///
/// Serialized as the JSON body of the token endpoint call (RFC 6749 §4.1.3).
/// Ephemeral: one instance per successful redirect.
#[derive(Debug, Clone, Serialize)]
pub struct TokenRequest {
    pub grant_type: String,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub code: String,
}

impl TokenRequest {
    /// Build an authorization-code grant request from the client
    /// configuration and the code delivered by the redirect.
    #[must_use]
    pub fn authorization_code(config: &AuthConfig, code: &str) -> Self {
        Self {
            grant_type: GRANT_TYPE_AUTHORIZATION_CODE.to_string(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            code: code.to_string(),
        }
    }
}

/// Token response from the authorization server
///
/// Standard OAuth 2.0 token response format (RFC 6749 §5.1). The payload is
/// otherwise opaque; fields the server omits stay `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<i64>,
}

/// The persisted authenticated session
///
/// At most one instance is live at a time: a new successful exchange
/// replaces it, a failed post-login fetch clears it. Owned by the session
/// store once persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthInfo {
    /// Access token for API authentication
    pub access_token: String,

    /// Refresh token, when the server issues one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Token type (always "Bearer" for OAuth 2.0)
    pub token_type: String,

    /// Access token lifetime in seconds, when the server reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,

    /// Absolute expiration timestamp (UTC), computed from `expires_in` at
    /// token creation time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl AuthInfo {
    /// Check if the access token is expired or will expire within the given
    /// threshold
    ///
    /// Returns `false` when the server reported no expiry.
    #[must_use]
    pub fn is_expired(&self, threshold_seconds: i64) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let threshold = chrono::Duration::seconds(threshold_seconds);
                Utc::now() + threshold >= expires_at
            }
            None => false,
        }
    }

    /// Get seconds until token expiration, or `None` if no expiry is set
    #[must_use]
    pub fn seconds_until_expiry(&self) -> Option<i64> {
        self.expires_at.map(|expires_at| (expires_at - Utc::now()).num_seconds())
    }
}

impl From<TokenResponse> for AuthInfo {
    fn from(response: TokenResponse) -> Self {
        let expires_at = response
            .expires_in
            .filter(|secs| *secs > 0)
            .map(|secs| Utc::now() + chrono::Duration::seconds(secs));

        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            token_type: response.token_type.unwrap_or_else(|| "Bearer".to_string()),
            expires_in: response.expires_in,
            expires_at,
        }
    }
}
