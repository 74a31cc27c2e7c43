//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Background worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the worker is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cron expression for the share expiry sweep.
    #[serde(default = "default_share_expiry_cron")]
    pub share_expiry_cron: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            share_expiry_cron: default_share_expiry_cron(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_share_expiry_cron() -> String {
    // Every 5 minutes
    "0 */5 * * * *".to_string()
}
