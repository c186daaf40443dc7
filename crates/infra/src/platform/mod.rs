//! Platform adapters
//!
//! The OS-backed host bridge: browser launch for the authorization page and
//! the terminal-step capabilities. Embedding applications with their own UI
//! surface provide their own `HostBridge` implementation instead.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use lingoarc_core::login::ports::{HostBridge, PermissionOutcome};
use lingoarc_domain::{LingoArcError, Result};
use tracing::{debug, info};

/// Host bridge backed by the operating system
///
/// Opens the authorization page in the system browser and reports status
/// through structured logging. Desktop hosts have no runtime permission
/// prompt, so permission requests report granted; the flow ends the same
/// way for either outcome.
#[derive(Debug, Default)]
pub struct SystemHostBridge {
    ended: AtomicBool,
}

impl SystemHostBridge {
    /// Create a new bridge
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the flow has signalled its end through this bridge
    #[must_use]
    pub fn ended(&self) -> bool {
        self.ended.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HostBridge for SystemHostBridge {
    async fn open_external_url(&self, url: &str) -> Result<()> {
        debug!(url = %url, "opening system browser");
        open::that_detached(url)
            .map_err(|e| LingoArcError::Platform(format!("failed to open browser: {e}")))
    }

    fn show_message(&self, text: &str) {
        info!(message = %text, "login status");
    }

    async fn request_os_permission(&self) -> PermissionOutcome {
        PermissionOutcome::Granted
    }

    fn end_flow(&self) {
        self.ended.store(true, Ordering::SeqCst);
        debug!("login flow ended");
    }
}
