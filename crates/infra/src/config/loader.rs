//! Configuration loader
//!
//! Loads the authentication configuration from environment variables or
//! files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//!
//! ## Environment Variables
//! - `LINGOARC_CLIENT_ID`: OAuth client ID (required)
//! - `LINGOARC_CLIENT_SECRET`: OAuth client secret (required)
//! - `LINGOARC_ORGANIZATION`: Organization name for enterprise accounts
//! - `LINGOARC_AUTH_HOST`: Authorization server host override
//! - `LINGOARC_REDIRECT_URI`: Redirect URI override
//!
//! ## File Locations
//! The loader probes `./lingoarc.toml` then `./config.toml` in the current
//! working directory.

use std::path::{Path, PathBuf};

use lingoarc_domain::{AuthConfig, LingoArcError, Result};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `LingoArcError::Config` if configuration cannot be loaded from
/// either source.
pub fn load() -> Result<AuthConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `LingoArcError::Config` if a required variable is missing.
pub fn load_from_env() -> Result<AuthConfig> {
    let client_id = env_var("LINGOARC_CLIENT_ID")?;
    let client_secret = env_var("LINGOARC_CLIENT_SECRET")?;
    let organization_name = std::env::var("LINGOARC_ORGANIZATION").ok();

    let mut config = AuthConfig::new(client_id, client_secret, organization_name);
    if let Ok(host) = std::env::var("LINGOARC_AUTH_HOST") {
        config = config.with_auth_host(host);
    }
    if let Ok(uri) = std::env::var("LINGOARC_REDIRECT_URI") {
        config = config.with_redirect_uri(uri);
    }

    Ok(config)
}

/// Load configuration from a TOML file
///
/// # Arguments
/// * `path` - Explicit file path, or `None` to probe the default locations
///
/// # Errors
/// Returns `LingoArcError::Config` if no file is found, the file cannot be
/// read, or the contents are invalid.
pub fn load_from_file(path: Option<&Path>) -> Result<AuthConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => probe_config_path()?,
    };

    let contents = std::fs::read_to_string(&path)
        .map_err(|e| LingoArcError::Config(format!("failed to read {}: {e}", path.display())))?;

    let config = toml::from_str(&contents)
        .map_err(|e| LingoArcError::Config(format!("invalid config file {}: {e}", path.display())))?;

    tracing::info!(path = %path.display(), "Configuration loaded from file");
    Ok(config)
}

fn probe_config_path() -> Result<PathBuf> {
    for candidate in ["lingoarc.toml", "config.toml"] {
        let path = PathBuf::from(candidate);
        if path.exists() {
            return Ok(path);
        }
    }

    Err(LingoArcError::Config(
        "no config file found (probed lingoarc.toml, config.toml)".to_string(),
    ))
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| LingoArcError::Config(format!("missing environment variable {name}")))
}
