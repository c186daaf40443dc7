//! Authorization-code login flow
//!
//! The flow is a reactive state machine driven by two external events: flow
//! start and the redirect callback. Everything it touches - token endpoint,
//! session storage, distribution lookup, host capabilities - sits behind the
//! port traits in [`ports`], so the flow is testable without any
//! infrastructure.

pub mod ports;
pub mod service;

pub use ports::{
    DistributionInfoProvider, HostBridge, PermissionOutcome, RealtimeConnector, SessionStore,
    TokenExchanger, TranslationLoader,
};
pub use service::{FlowState, LoginFlowPorts, LoginFlowService};
