//! Identity provider (OIDC) configuration.

use serde::{Deserialize, Serialize};

/// OIDC identity provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OidcConfig {
    /// Issuer base URL; the `iss` claim of every token must match this.
    pub issuer_url: String,
    /// OAuth2 client ID.
    pub client_id: String,
    /// OAuth2 client secret.
    pub client_secret: String,
    /// Token endpoint for code exchange and refresh.
    pub token_endpoint: String,
    /// JWKS endpoint publishing the provider's signing keys.
    pub jwks_url: String,
    /// Timeout for token endpoint calls in seconds.
    #[serde(default = "default_token_timeout")]
    pub token_timeout_seconds: u64,
    /// Clock skew leeway for token expiry validation in seconds.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
    /// Pre-validated bypass credential for test harnesses.
    ///
    /// Ignored entirely when the server runs in production mode.
    #[serde(default)]
    pub dev_bypass_token: Option<String>,
}

fn default_token_timeout() -> u64 {
    10
}

fn default_leeway() -> u64 {
    30
}
