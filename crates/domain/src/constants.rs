//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! login flow.

// Authorization flow configuration
//
// Compared to the attempt counter with exact equality: the authorization
// page may be opened only while the counter has not yet reached this value.
pub const AUTH_ATTEMPT_THRESHOLD: u32 = 1;

// OAuth 2.0 protocol constants
pub const GRANT_TYPE_AUTHORIZATION_CODE: &str = "authorization_code";
pub const OAUTH_SCOPE: &str = "project";
pub const OAUTH_RESPONSE_TYPE: &str = "code";

// Default endpoints
pub const DEFAULT_AUTH_HOST: &str = "accounts.lingoarc.com";
pub const DEFAULT_API_BASE_URL: &str = "https://api.lingoarc.com/v1";
pub const DEFAULT_REDIRECT_URI: &str = "lingoarc://";

// Event tags delivered at flow start
pub const EVENT_REALTIME_UPDATE: &str = "realtime_update";

// HTTP client configuration
pub const HTTP_TIMEOUT_SECS: u64 = 30;
