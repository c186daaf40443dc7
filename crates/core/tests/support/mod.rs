//! Shared test helpers for `lingoarc-core` integration tests.
//!
//! Provides in-memory mocks for all login-flow ports, enabling deterministic
//! tests without network, filesystem, or platform dependencies.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lingoarc_core::login::ports::{
    DistributionInfoProvider, HostBridge, PermissionOutcome, RealtimeConnector, SessionStore,
    TokenExchanger, TranslationLoader,
};
use lingoarc_domain::{
    AuthInfo, DistributionInfo, LingoArcError, Result as DomainResult, TokenRequest, TokenResponse,
};

/// In-memory mock for `TokenExchanger`.
///
/// Configured to succeed with a fixed token or fail uniformly; records the
/// number of calls and the organization domain it last received.
pub struct MockTokenExchanger {
    succeed: bool,
    access_token: String,
    pub calls: AtomicUsize,
    pub last_domain: Mutex<Option<String>>,
}

impl MockTokenExchanger {
    /// Create a mock that answers every exchange with the given token.
    pub fn succeeding(access_token: &str) -> Self {
        Self {
            succeed: true,
            access_token: access_token.to_string(),
            calls: AtomicUsize::new(0),
            last_domain: Mutex::new(None),
        }
    }

    /// Create a mock that fails every exchange.
    pub fn failing() -> Self {
        Self {
            succeed: false,
            access_token: String::new(),
            calls: AtomicUsize::new(0),
            last_domain: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenExchanger for MockTokenExchanger {
    async fn exchange(
        &self,
        _request: &TokenRequest,
        organization_domain: Option<&str>,
    ) -> DomainResult<TokenResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_domain.lock().unwrap() = organization_domain.map(ToString::to_string);

        if self.succeed {
            Ok(TokenResponse {
                access_token: self.access_token.clone(),
                refresh_token: Some("refresh".to_string()),
                token_type: Some("Bearer".to_string()),
                expires_in: Some(3600),
            })
        } else {
            Err(LingoArcError::Auth("token endpoint returned status 401".to_string()))
        }
    }
}

/// In-memory mock for `SessionStore`.
///
/// A `Mutex<Option<AuthInfo>>` stands in for the persistent medium.
#[derive(Default)]
pub struct MockSessionStore {
    session: Mutex<Option<AuthInfo>>,
}

impl MockSessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with a persisted session.
    pub fn authorized(access_token: &str) -> Self {
        let info: AuthInfo = TokenResponse {
            access_token: access_token.to_string(),
            refresh_token: None,
            token_type: None,
            expires_in: Some(3600),
        }
        .into();

        Self { session: Mutex::new(Some(info)) }
    }

    /// Snapshot of the currently persisted session.
    pub fn current(&self) -> Option<AuthInfo> {
        self.session.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn save(&self, info: Option<&AuthInfo>) -> DomainResult<()> {
        *self.session.lock().unwrap() = info.cloned();
        Ok(())
    }

    async fn load(&self) -> DomainResult<Option<AuthInfo>> {
        Ok(self.session.lock().unwrap().clone())
    }

    async fn is_authorized(&self) -> bool {
        self.session.lock().unwrap().is_some()
    }
}

/// In-memory mock for `DistributionInfoProvider`.
pub struct MockDistributionProvider {
    succeed: bool,
    pub calls: AtomicUsize,
}

impl MockDistributionProvider {
    pub fn succeeding() -> Self {
        Self { succeed: true, calls: AtomicUsize::new(0) }
    }

    pub fn failing() -> Self {
        Self { succeed: false, calls: AtomicUsize::new(0) }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DistributionInfoProvider for MockDistributionProvider {
    async fn fetch(&self) -> DomainResult<DistributionInfo> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.succeed {
            Ok(DistributionInfo::new(serde_json::json!({"data": {"hash": "dist"}})))
        } else {
            Err(LingoArcError::Network("distribution endpoint unreachable".to_string()))
        }
    }
}

/// Recording mock for `HostBridge`.
///
/// Captures opened URLs, shown messages, permission requests, and flow-end
/// signals so tests can assert on the flow's outward behaviour.
pub struct MockHostBridge {
    permission_outcome: PermissionOutcome,
    pub opened_urls: Mutex<Vec<String>>,
    pub messages: Mutex<Vec<String>>,
    pub permission_requests: AtomicUsize,
    pub flow_ends: AtomicUsize,
}

impl MockHostBridge {
    pub fn new() -> Self {
        Self::with_permission(PermissionOutcome::Granted)
    }

    pub fn with_permission(permission_outcome: PermissionOutcome) -> Self {
        Self {
            permission_outcome,
            opened_urls: Mutex::new(Vec::new()),
            messages: Mutex::new(Vec::new()),
            permission_requests: AtomicUsize::new(0),
            flow_ends: AtomicUsize::new(0),
        }
    }

    pub fn opened_urls(&self) -> Vec<String> {
        self.opened_urls.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn flow_end_count(&self) -> usize {
        self.flow_ends.load(Ordering::SeqCst)
    }
}

impl Default for MockHostBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostBridge for MockHostBridge {
    async fn open_external_url(&self, url: &str) -> DomainResult<()> {
        self.opened_urls.lock().unwrap().push(url.to_string());
        Ok(())
    }

    fn show_message(&self, text: &str) {
        self.messages.lock().unwrap().push(text.to_string());
    }

    async fn request_os_permission(&self) -> PermissionOutcome {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
        self.permission_outcome
    }

    fn end_flow(&self) {
        self.flow_ends.fetch_add(1, Ordering::SeqCst);
    }
}

/// Counting mock for `RealtimeConnector`.
#[derive(Default)]
pub struct MockRealtimeConnector {
    pub attempts: AtomicUsize,
}

impl MockRealtimeConnector {
    pub fn attempt_count(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl RealtimeConnector for MockRealtimeConnector {
    fn try_connect(&self) {
        self.attempts.fetch_add(1, Ordering::SeqCst);
    }
}

/// Counting mock for `TranslationLoader`.
#[derive(Default)]
pub struct MockTranslationLoader {
    pub loads: AtomicUsize,
}

impl MockTranslationLoader {
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl TranslationLoader for MockTranslationLoader {
    fn load(&self) {
        self.loads.fetch_add(1, Ordering::SeqCst);
    }
}

/// Everything a flow test needs, with handles kept for assertions.
pub struct TestHarness {
    pub exchanger: Arc<MockTokenExchanger>,
    pub sessions: Arc<MockSessionStore>,
    pub distribution: Arc<MockDistributionProvider>,
    pub realtime: Arc<MockRealtimeConnector>,
    pub translations: Arc<MockTranslationLoader>,
    pub host: Arc<MockHostBridge>,
}

impl TestHarness {
    /// Harness with an empty store, a succeeding exchanger, and a succeeding
    /// distribution provider.
    pub fn new() -> Self {
        Self {
            exchanger: Arc::new(MockTokenExchanger::succeeding("access123")),
            sessions: Arc::new(MockSessionStore::new()),
            distribution: Arc::new(MockDistributionProvider::succeeding()),
            realtime: Arc::new(MockRealtimeConnector::default()),
            translations: Arc::new(MockTranslationLoader::default()),
            host: Arc::new(MockHostBridge::new()),
        }
    }

    /// Bundle the mocks into the port set consumed by the service.
    pub fn ports(&self) -> lingoarc_core::login::service::LoginFlowPorts {
        lingoarc_core::login::service::LoginFlowPorts {
            exchanger: self.exchanger.clone(),
            sessions: self.sessions.clone(),
            distribution: self.distribution.clone(),
            realtime: self.realtime.clone(),
            translations: self.translations.clone(),
            host: self.host.clone(),
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
