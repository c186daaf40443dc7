//! # LingoArc Infrastructure
//!
//! Infrastructure implementations of the core login-flow ports.
//!
//! This crate contains:
//! - HTTP clients for the token and distribution endpoints
//! - File-backed session persistence
//! - The OS-backed host bridge (browser launch)
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Implements traits defined in `lingoarc-core`
//! - Depends on `lingoarc-domain` and `lingoarc-core`
//! - Contains all "impure" code (I/O, platform APIs)

pub mod api;
pub mod config;
pub mod observability;
pub mod platform;
pub mod storage;

// Re-export commonly used items
pub use api::{DistributionInfoClient, TokenExchangeClient};
pub use platform::SystemHostBridge;
pub use storage::FileSessionStore;
