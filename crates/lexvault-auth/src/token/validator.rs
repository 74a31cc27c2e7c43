//! Identity token validation: signature, expiry, and issuer.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, Validation, decode, decode_header};

use lexvault_core::config::oidc::OidcConfig;
use lexvault_core::error::AppError;

use super::claims::IdClaims;
use super::jwks::JwksClient;

/// Validates identity tokens against the provider's published keys.
///
/// Performs full RS256 signature verification in addition to expiry and
/// issuer checks. An unknown `kid` triggers one JWKS re-fetch before the
/// token is rejected, covering provider key rotation.
#[derive(Debug)]
pub struct TokenValidator {
    jwks: Arc<JwksClient>,
    validation: Validation,
}

impl TokenValidator {
    /// Creates a new validator from OIDC configuration.
    pub fn new(config: &OidcConfig, jwks: Arc<JwksClient>) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;
        validation.set_issuer(&[config.issuer_url.as_str()]);

        Self { jwks, validation }
    }

    /// Decodes and validates an access token string.
    ///
    /// Checks:
    /// 1. Signature validity against the JWKS
    /// 2. Expiration (with configured leeway)
    /// 3. Issuer matches the configured provider
    pub async fn validate(&self, token: &str) -> Result<IdClaims, AppError> {
        let header = decode_header(token)
            .map_err(|_| AppError::unauthenticated("Invalid token format"))?;

        let kid = header
            .kid
            .ok_or_else(|| AppError::unauthenticated("Token header missing key ID"))?;

        let key = match self.jwks.key_for(&kid).await {
            Some(key) => key,
            None => {
                // Unknown kid: the provider may have rotated keys.
                self.jwks.refresh().await?;
                self.jwks
                    .key_for(&kid)
                    .await
                    .ok_or_else(|| AppError::unauthenticated("Token signed by unknown key"))?
            }
        };

        let data = decode::<IdClaims>(token, &key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthenticated("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::unauthenticated("Invalid token signature")
                }
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                    AppError::unauthenticated("Token issuer mismatch")
                }
                _ => AppError::unauthenticated(format!("Token validation failed: {e}")),
            }
        })?;

        Ok(data.claims)
    }
}
