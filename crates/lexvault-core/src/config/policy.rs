//! Policy decision point configuration.

use serde::{Deserialize, Serialize};

/// External policy decision point (PDP) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Whether the external PDP is consulted at all.
    ///
    /// When false, every decision goes straight to the fallback engine.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Base URL of the PDP service.
    #[serde(default)]
    pub base_url: String,
    /// Per-call timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: String::new(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_timeout_ms() -> u64 {
    5000
}
