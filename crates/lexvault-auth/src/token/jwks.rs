//! JWKS key set retrieval and caching.

use std::collections::HashMap;
use std::time::Duration;

use jsonwebtoken::DecodingKey;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use lexvault_core::config::oidc::OidcConfig;
use lexvault_core::error::AppError;

/// A single JSON Web Key as published by the identity provider.
#[derive(Debug, Clone, Deserialize)]
struct Jwk {
    kty: String,
    kid: Option<String>,
    /// RSA modulus (base64url).
    n: Option<String>,
    /// RSA exponent (base64url).
    e: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

/// Fetches and caches the identity provider's signing keys.
///
/// Keys are held in memory and re-fetched explicitly when a token
/// presents an unknown `kid`.
pub struct JwksClient {
    http: reqwest::Client,
    jwks_url: String,
    keys: RwLock<HashMap<String, DecodingKey>>,
}

impl std::fmt::Debug for JwksClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwksClient")
            .field("jwks_url", &self.jwks_url)
            .finish()
    }
}

impl JwksClient {
    /// Creates a new JWKS client from OIDC configuration.
    pub fn new(config: &OidcConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.token_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    lexvault_core::ErrorKind::Configuration,
                    "Failed to build JWKS HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            http,
            jwks_url: config.jwks_url.clone(),
            keys: RwLock::new(HashMap::new()),
        })
    }

    /// Returns the decoding key for the given key ID, if cached.
    pub async fn key_for(&self, kid: &str) -> Option<DecodingKey> {
        self.keys.read().await.get(kid).cloned()
    }

    /// Fetches the key set from the provider and replaces the cache.
    pub async fn refresh(&self) -> Result<(), AppError> {
        debug!(url = %self.jwks_url, "Fetching JWKS");

        let set: JwkSet = self
            .http
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    lexvault_core::ErrorKind::ExternalService,
                    "Failed to fetch JWKS",
                    e,
                )
            })?
            .error_for_status()
            .map_err(|e| {
                AppError::with_source(
                    lexvault_core::ErrorKind::ExternalService,
                    "JWKS endpoint returned an error",
                    e,
                )
            })?
            .json()
            .await
            .map_err(|e| {
                AppError::with_source(
                    lexvault_core::ErrorKind::ExternalService,
                    "Failed to parse JWKS response",
                    e,
                )
            })?;

        let mut fresh = HashMap::new();
        for jwk in set.keys {
            if jwk.kty != "RSA" {
                continue;
            }
            let (Some(kid), Some(n), Some(e)) = (jwk.kid, jwk.n, jwk.e) else {
                warn!("Skipping JWKS entry with missing kid/n/e");
                continue;
            };
            match DecodingKey::from_rsa_components(&n, &e) {
                Ok(key) => {
                    fresh.insert(kid, key);
                }
                Err(err) => {
                    warn!(kid = %kid, error = %err, "Skipping unparseable JWKS entry");
                }
            }
        }

        if fresh.is_empty() {
            return Err(AppError::external_service(
                "JWKS response contained no usable RSA keys",
            ));
        }

        debug!(count = fresh.len(), "JWKS cache refreshed");
        *self.keys.write().await = fresh;
        Ok(())
    }
}
