//! Post-login distribution configuration

use serde::{Deserialize, Serialize};

/// Distribution configuration fetched after a session is established
///
/// The login flow never inspects the payload beyond success/failure of the
/// fetch; downstream SDK layers consume the contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistributionInfo(serde_json::Value);

impl DistributionInfo {
    /// Wrap a raw distribution payload
    #[must_use]
    pub fn new(payload: serde_json::Value) -> Self {
        Self(payload)
    }

    /// Consume the wrapper, yielding the raw payload
    #[must_use]
    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }
}
