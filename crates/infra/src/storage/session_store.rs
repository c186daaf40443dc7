//! File-backed session store
//!
//! Persists the authenticated session as a JSON document so it survives
//! process restarts. The file is the sole source of truth for "is there a
//! logged-in session": saving a new session replaces the file, clearing
//! deletes it.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use lingoarc_core::login::ports::SessionStore;
use lingoarc_domain::{AuthInfo, LingoArcError, Result};
use tracing::{debug, warn};

/// Session store backed by a JSON file
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store persisting to the given path
    ///
    /// Parent directories are created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Persist the session, or clear it when `info` is `None`
    ///
    /// Clearing an absent session is a no-op.
    ///
    /// # Errors
    /// Returns `LingoArcError::Storage` if serialization or file IO fails.
    pub async fn save(&self, info: Option<&AuthInfo>) -> Result<()> {
        match info {
            Some(info) => {
                if let Some(parent) = self.path.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await.map_err(|e| {
                            LingoArcError::Storage(format!("failed to create session dir: {e}"))
                        })?;
                    }
                }

                let json = serde_json::to_string_pretty(info).map_err(|e| {
                    LingoArcError::Storage(format!("failed to serialize session: {e}"))
                })?;

                tokio::fs::write(&self.path, json).await.map_err(|e| {
                    LingoArcError::Storage(format!("failed to write session file: {e}"))
                })?;

                debug!(path = %self.path.display(), "session persisted");
                Ok(())
            }
            None => match tokio::fs::remove_file(&self.path).await {
                Ok(()) => {
                    debug!(path = %self.path.display(), "session cleared");
                    Ok(())
                }
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => {
                    Err(LingoArcError::Storage(format!("failed to clear session file: {e}")))
                }
            },
        }
    }

    /// Load the persisted session, if any
    ///
    /// # Errors
    /// Returns `LingoArcError::Storage` if the file exists but cannot be
    /// read or parsed (not if no session exists).
    pub async fn load(&self) -> Result<Option<AuthInfo>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(LingoArcError::Storage(format!("failed to read session file: {e}")))
            }
        };

        let info = serde_json::from_str(&contents)
            .map_err(|e| LingoArcError::Storage(format!("corrupt session file: {e}")))?;

        Ok(Some(info))
    }

    /// Check whether a session is currently persisted
    ///
    /// A storage failure reads as "not authorized" rather than surfacing an
    /// error.
    pub async fn is_authorized(&self) -> bool {
        match self.load().await {
            Ok(session) => session.is_some(),
            Err(err) => {
                warn!(error = %err, "session check failed");
                false
            }
        }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn save(&self, info: Option<&AuthInfo>) -> Result<()> {
        self.save(info).await
    }

    async fn load(&self) -> Result<Option<AuthInfo>> {
        self.load().await
    }

    async fn is_authorized(&self) -> bool {
        self.is_authorized().await
    }
}
