//! Port interfaces for the login flow
//!
//! These traits define the boundaries between the flow state machine and
//! infrastructure implementations.

use async_trait::async_trait;
use lingoarc_domain::{AuthInfo, DistributionInfo, Result, TokenRequest, TokenResponse};

/// Trait for exchanging an authorization code for tokens
#[async_trait]
pub trait TokenExchanger: Send + Sync {
    /// Exchange an authorization code for a token response
    ///
    /// # Arguments
    /// * `request` - Token request carrying the grant, client credentials,
    ///   redirect URI, and code
    /// * `organization_domain` - Organization scope for enterprise accounts
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status, or an
    /// unparseable body. Callers treat all of these uniformly.
    async fn exchange(
        &self,
        request: &TokenRequest,
        organization_domain: Option<&str>,
    ) -> Result<TokenResponse>;
}

/// Trait for persisting the authenticated session
///
/// The store is the sole source of truth for "is there a logged-in
/// session"; persistence survives process restarts.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist the session, or clear it when `info` is `None`
    ///
    /// Clearing an absent session is a no-op.
    ///
    /// # Errors
    /// Returns error if storage fails
    async fn save(&self, info: Option<&AuthInfo>) -> Result<()>;

    /// Load the persisted session, if any
    ///
    /// # Errors
    /// Returns error if the storage medium fails (not if no session exists)
    async fn load(&self) -> Result<Option<AuthInfo>>;

    /// Check whether a session is currently persisted
    async fn is_authorized(&self) -> bool;
}

/// Trait for fetching the post-login distribution configuration
///
/// One call resolves to exactly one of `Ok`/`Err`, never both, never
/// neither.
#[async_trait]
pub trait DistributionInfoProvider: Send + Sync {
    /// Fetch the distribution configuration for the current session
    ///
    /// # Errors
    /// Returns error if the fetch fails; the flow does not retry and rolls
    /// the session back.
    async fn fetch(&self) -> Result<DistributionInfo>;
}

/// Outcome of a host permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionOutcome {
    Granted,
    Denied,
}

/// Host capabilities the flow invokes but does not implement
///
/// Implemented by the embedding application (a real OS-backed bridge) and by
/// test doubles. The flow never depends on how these are rendered.
#[async_trait]
pub trait HostBridge: Send + Sync {
    /// Open an external URL (the authorization page) in the system browser
    ///
    /// # Errors
    /// Returns error if the browser cannot be launched
    async fn open_external_url(&self, url: &str) -> Result<()>;

    /// Display a transient status message to the user
    fn show_message(&self, text: &str);

    /// Request the single OS permission the flow needs, if not already
    /// granted
    ///
    /// The bridge decides whether a prompt is necessary; the outcome never
    /// branches the flow.
    async fn request_os_permission(&self) -> PermissionOutcome;

    /// Signal that the flow has finished and the host may tear down its
    /// surface
    fn end_flow(&self);
}

/// Trait for attempting the optional real-time preview connection
///
/// Attempts are cheap and idempotent; failures are swallowed by the
/// implementation.
pub trait RealtimeConnector: Send + Sync {
    /// Try to establish the real-time connection
    fn try_connect(&self);
}

/// Trait for triggering translation loading after a successful login
///
/// Fire-and-forget from the flow's perspective.
pub trait TranslationLoader: Send + Sync {
    /// Trigger translation loading
    fn load(&self);
}
