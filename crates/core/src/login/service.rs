//! Login flow state machine
//!
//! Orchestrates the authorization-code flow: session fast-path, attempt-gated
//! browser launch, redirect handling, token exchange, and the post-login
//! sequence (distribution lookup, optional real-time connection, translation
//! load), ending in a single terminal permission/cleanup step.
//!
//! The service is reactive: it is driven by [`LoginFlowService::start`] and
//! [`LoginFlowService::handle_redirect`] and performs no polling of its own.
//! Every failure is handled locally by steering the flow to the terminal
//! step; nothing is re-thrown to the host.

use std::sync::Arc;

use lingoarc_domain::constants::{
    AUTH_ATTEMPT_THRESHOLD, EVENT_REALTIME_UPDATE, OAUTH_RESPONSE_TYPE, OAUTH_SCOPE,
};
use lingoarc_domain::{AuthConfig, AuthInfo, Result, TokenRequest};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use url::Url;

use super::ports::{
    DistributionInfoProvider, HostBridge, PermissionOutcome, RealtimeConnector, SessionStore,
    TokenExchanger, TranslationLoader,
};

/// Observable state of one flow instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Init,
    CheckingSession,
    AwaitingAuthorization,
    AwaitingRedirect,
    ExchangingCode,
    PostLogin,
    Terminal,
}

/// Mutable state scoped to one run of the flow
///
/// `attempt_count` is incremented each time the authorization page is opened
/// and never decremented; `event` is the opaque tag carried from flow start
/// to the post-login real-time decision.
struct FlowAttemptState {
    state: FlowState,
    attempt_count: u32,
    event: Option<String>,
}

/// The external effects the flow depends on, as injected ports
///
/// Bundling them keeps [`LoginFlowService::new`] readable and lets tests
/// swap any subset for doubles.
#[derive(Clone)]
pub struct LoginFlowPorts {
    pub exchanger: Arc<dyn TokenExchanger>,
    pub sessions: Arc<dyn SessionStore>,
    pub distribution: Arc<dyn DistributionInfoProvider>,
    pub realtime: Arc<dyn RealtimeConnector>,
    pub translations: Arc<dyn TranslationLoader>,
    pub host: Arc<dyn HostBridge>,
}

/// Authorization-code login flow controller
///
/// One instance corresponds to one login attempt. The instance owns its
/// attempt counter and event tag; the persisted session lives in the
/// injected [`SessionStore`].
pub struct LoginFlowService {
    config: AuthConfig,
    ports: LoginFlowPorts,
    inner: Mutex<FlowAttemptState>,
}

impl LoginFlowService {
    /// Create a new flow instance
    ///
    /// # Arguments
    /// * `config` - Immutable OAuth client configuration
    /// * `ports` - Infrastructure ports (or test doubles)
    #[must_use]
    pub fn new(config: AuthConfig, ports: LoginFlowPorts) -> Self {
        Self {
            config,
            ports,
            inner: Mutex::new(FlowAttemptState {
                state: FlowState::Init,
                attempt_count: 0,
                event: None,
            }),
        }
    }

    /// Start (or re-enter) the flow
    ///
    /// With a persisted session the authorization step is skipped entirely:
    /// the real-time connection is attempted unconditionally (cheap and
    /// idempotent) and the flow proceeds to the terminal step. Otherwise the
    /// authorization page is opened, subject to the attempt gate.
    ///
    /// # Arguments
    /// * `event` - Opaque tag echoed through to the post-login decision;
    ///   `"realtime_update"` requests the real-time connection.
    pub async fn start(&self, event: Option<&str>) {
        {
            let mut flow = self.inner.lock().await;
            flow.event = event.map(ToString::to_string);
            flow.state = FlowState::CheckingSession;
        }

        if self.ports.sessions.is_authorized().await {
            debug!("session already authorized; skipping authorization step");
            self.ports.realtime.try_connect();
            self.finish().await;
        } else {
            self.request_authorization().await;
        }
    }

    /// Open the authorization page, gated by the attempt counter
    ///
    /// The comparison is exact: opening the browser is allowed only while
    /// `attempt_count` has not yet reached `AUTH_ATTEMPT_THRESHOLD`; once it
    /// has, no more launches occur and the flow falls through to the
    /// terminal step. This boundary determines the maximum number of
    /// authorization-page launches per flow instance.
    async fn request_authorization(&self) {
        let url = {
            let mut flow = self.inner.lock().await;
            flow.state = FlowState::AwaitingAuthorization;

            if flow.attempt_count != AUTH_ATTEMPT_THRESHOLD {
                flow.attempt_count += 1;
                flow.state = FlowState::AwaitingRedirect;
                Some(build_authorization_url(&self.config))
            } else {
                None
            }
        };

        match url {
            Some(url) => {
                info!("opening authorization page");
                if let Err(err) = self.ports.host.open_external_url(&url).await {
                    // No redirect will arrive; the flow stalls in
                    // AwaitingRedirect, which is an accepted terminal
                    // condition for an abandoned attempt.
                    error!(error = %err, "failed to open authorization page");
                }
            }
            None => self.finish().await,
        }
    }

    /// Handle the redirect callback delivered by the host
    ///
    /// Extracts the `code` query parameter from the redirect URI; an
    /// unparseable URI or a missing parameter is treated as an empty code.
    pub async fn handle_redirect(&self, redirect_uri: &str) {
        let code = extract_authorization_code(redirect_uri);
        self.handle_code(&code).await;
    }

    /// Handle an authorization code
    ///
    /// An empty code means the user did not authorize: the flow reports it
    /// and proceeds to the terminal step without an exchange. A non-empty
    /// code is exchanged for a token; any exchange failure (transport,
    /// non-success status, empty or unparseable body) is treated uniformly
    /// as not-authenticated with no retry of the exchange.
    pub async fn handle_code(&self, code: &str) {
        {
            let mut flow = self.inner.lock().await;
            if flow.state != FlowState::AwaitingRedirect {
                warn!(state = ?flow.state, "redirect delivered outside AwaitingRedirect; ignoring");
                return;
            }
            if !code.is_empty() {
                flow.state = FlowState::ExchangingCode;
            }
        }

        if code.is_empty() {
            warn!("redirect arrived without an authorization code");
            self.ports.host.show_message("Not authorized.");
            self.finish().await;
            return;
        }

        let request = TokenRequest::authorization_code(&self.config, code);
        let exchanged = self
            .ports
            .exchanger
            .exchange(&request, self.config.organization_name.as_deref())
            .await;

        match exchanged {
            Ok(response) if !response.access_token.is_empty() => {
                let info = AuthInfo::from(response);
                match self.ports.sessions.save(Some(&info)).await {
                    Ok(()) => {
                        info!("authentication succeeded; session persisted");
                        self.inner.lock().await.state = FlowState::PostLogin;
                        self.post_login().await;
                    }
                    Err(err) => {
                        error!(error = %err, "failed to persist session");
                        self.not_authenticated().await;
                    }
                }
            }
            Ok(_) => {
                debug!("token endpoint returned an empty access token");
                self.not_authenticated().await;
            }
            Err(err) => {
                debug!(error = %err, "token exchange failed");
                self.not_authenticated().await;
            }
        }
    }

    /// Run the post-login sequence after a persisted session
    ///
    /// A successful distribution fetch triggers the real-time connection
    /// (when requested via the event tag), the terminal step, and then
    /// translation loading. A failed fetch rolls the session back before the
    /// terminal step; translations are not loaded.
    async fn post_login(&self) {
        match self.ports.distribution.fetch().await {
            Ok(_info) => {
                let realtime_requested = {
                    let flow = self.inner.lock().await;
                    flow.event.as_deref() == Some(EVENT_REALTIME_UPDATE)
                };
                if realtime_requested {
                    self.ports.realtime.try_connect();
                }
                self.finish().await;
                self.ports.translations.load();
            }
            Err(err) => {
                debug!(error = %err, "distribution info fetch failed; rolling back session");
                if let Err(save_err) = self.ports.sessions.save(None).await {
                    error!(error = %save_err, "failed to clear session after fetch failure");
                }
                self.finish().await;
            }
        }
    }

    async fn not_authenticated(&self) {
        self.ports.host.show_message("Not authenticated.");
        self.finish().await;
    }

    /// Terminal step: one permission request, then end the flow
    ///
    /// The permission outcome never branches the flow; granted and denied
    /// both end it the same way. Invoking the terminal step again performs
    /// no authorization or exchange work.
    async fn finish(&self) {
        self.inner.lock().await.state = FlowState::Terminal;

        let outcome = self.ports.host.request_os_permission().await;
        if outcome == PermissionOutcome::Denied {
            debug!("os permission denied; flow ends normally");
        }
        self.ports.host.end_flow();
    }

    /// Clear the persisted session
    ///
    /// # Errors
    /// Returns error if the store fails to clear
    pub async fn logout(&self) -> Result<()> {
        self.ports.sessions.save(None).await
    }

    /// Current state of this flow instance
    pub async fn state(&self) -> FlowState {
        self.inner.lock().await.state
    }

    /// Number of authorization-page launches performed by this instance
    pub async fn attempt_count(&self) -> u32 {
        self.inner.lock().await.attempt_count
    }
}

/// Build the authorization URL for one attempt
///
/// Query parameters: `client_id`, `response_type=code`, `scope=project`,
/// `redirect_uri`, and `domain=<org>` when an organization is configured.
fn build_authorization_url(config: &AuthConfig) -> String {
    let mut query = format!(
        "client_id={}&response_type={}&scope={}&redirect_uri={}",
        urlencoding::encode(&config.client_id),
        OAUTH_RESPONSE_TYPE,
        OAUTH_SCOPE,
        urlencoding::encode(&config.redirect_uri),
    );

    if let Some(org) = &config.organization_name {
        query.push_str("&domain=");
        query.push_str(&urlencoding::encode(org));
    }

    format!("{}?{}", config.authorize_url(), query)
}

/// Extract the `code` query parameter from a redirect URI
///
/// Returns an empty string when the URI does not parse or carries no code.
fn extract_authorization_code(redirect_uri: &str) -> String {
    match Url::parse(redirect_uri) {
        Ok(url) => url
            .query_pairs()
            .find(|(key, _)| key == "code")
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}
