//! OIDC token endpoint client: code exchange and refresh.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use lexvault_core::config::oidc::OidcConfig;
use lexvault_core::error::{AppError, ErrorKind};

/// Standard OAuth2 token response shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// New access credential.
    pub access_token: String,
    /// New refresh credential, when the provider rotates them.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Access credential lifetime in seconds.
    pub expires_in: i64,
}

/// Client for the identity provider's token endpoint.
///
/// Both calls carry an explicit request timeout; a hung provider must not
/// hold request handling open indefinitely.
#[derive(Debug, Clone)]
pub struct OidcClient {
    http: reqwest::Client,
    token_endpoint: String,
    client_id: String,
    client_secret: String,
}

impl OidcClient {
    /// Creates a new OIDC client from configuration.
    pub fn new(config: &OidcConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.token_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build OIDC HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            http,
            token_endpoint: config.token_endpoint.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        })
    }

    /// Exchanges an authorization code for tokens.
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenResponse, AppError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
        ];
        self.request_tokens(&params).await
    }

    /// Exchanges a refresh token for new tokens.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, AppError> {
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
        ];
        self.request_tokens(&params).await
    }

    async fn request_tokens(&self, params: &[(&str, &str)]) -> Result<TokenResponse, AppError> {
        let response = self
            .http
            .post(&self.token_endpoint)
            .form(params)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Token endpoint request failed");
                AppError::with_source(ErrorKind::ExternalService, "Token endpoint unreachable", e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(status = %status, "Token endpoint returned an error");
            return Err(AppError::external_service(format!(
                "Token endpoint returned {status}"
            )));
        }

        response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                "Failed to parse token response",
                e,
            )
        })
    }
}
