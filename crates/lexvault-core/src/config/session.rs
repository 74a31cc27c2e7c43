//! Session management configuration.

use serde::{Deserialize, Serialize};

/// Session management configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session ID for browser clients.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Absolute session lifetime in hours (regardless of refresh activity).
    #[serde(default = "default_absolute_timeout")]
    pub absolute_timeout_hours: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            absolute_timeout_hours: default_absolute_timeout(),
        }
    }
}

fn default_cookie_name() -> String {
    "lexvault_session".to_string()
}

fn default_absolute_timeout() -> u64 {
    12
}
