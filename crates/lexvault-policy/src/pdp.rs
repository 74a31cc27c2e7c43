//! External policy decision point (PDP) client.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use lexvault_core::config::policy::PolicyConfig;
use lexvault_core::error::{AppError, ErrorKind};

use crate::decision::{Decision, Obligations, PolicyQuery};

#[derive(Debug, Serialize)]
struct DecisionRequest<'a> {
    input: &'a PolicyQuery,
}

#[derive(Debug, Serialize)]
struct BatchDecisionRequest<'a> {
    inputs: &'a [PolicyQuery],
}

#[derive(Debug, Deserialize)]
struct DecisionResponse {
    result: bool,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    obligations: Option<Obligations>,
}

#[derive(Debug, Deserialize)]
struct BatchDecisionResponse {
    results: Vec<BatchDecisionEntry>,
}

#[derive(Debug, Deserialize)]
struct BatchDecisionEntry {
    allow: bool,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    obligations: Option<Obligations>,
}

/// HTTP client for the external policy decision point.
///
/// Every failure mode (non-success status, timeout, transport error,
/// unparseable body) collapses to [`Decision::Unavailable`] so the
/// caller can fall back; this client never returns an error.
#[derive(Debug, Clone)]
pub struct PdpClient {
    http: reqwest::Client,
    base_url: String,
    enabled: bool,
}

impl PdpClient {
    /// Creates a new PDP client from configuration.
    pub fn new(config: &PolicyConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build PDP HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            enabled: config.enabled,
        })
    }

    /// Evaluates a single authorization query.
    pub async fn decide(&self, query: &PolicyQuery) -> Decision {
        if !self.enabled {
            return Decision::Unavailable;
        }

        let url = format!("{}/v1/decision", self.base_url);
        let response = match self
            .http
            .post(&url)
            .json(&DecisionRequest { input: query })
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, action = %query.action, "PDP unreachable");
                return Decision::Unavailable;
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "PDP returned a non-success status");
            return Decision::Unavailable;
        }

        match response.json::<DecisionResponse>().await {
            Ok(body) => into_decision(body.result, body.reason, body.obligations),
            Err(e) => {
                warn!(error = %e, "PDP response could not be parsed");
                Decision::Unavailable
            }
        }
    }

    /// Evaluates a batch of queries with per-element fallback semantics.
    ///
    /// Any failure of the batch call marks every element unavailable.
    pub async fn decide_many(&self, queries: &[PolicyQuery]) -> Vec<Decision> {
        if !self.enabled || queries.is_empty() {
            return vec![Decision::Unavailable; queries.len()];
        }

        let url = format!("{}/v1/decision/batch", self.base_url);
        let response = match self
            .http
            .post(&url)
            .json(&BatchDecisionRequest { inputs: queries })
            .send()
            .await
        {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                warn!(status = %r.status(), "PDP batch returned a non-success status");
                return vec![Decision::Unavailable; queries.len()];
            }
            Err(e) => {
                warn!(error = %e, "PDP batch unreachable");
                return vec![Decision::Unavailable; queries.len()];
            }
        };

        match response.json::<BatchDecisionResponse>().await {
            Ok(body) if body.results.len() == queries.len() => body
                .results
                .into_iter()
                .map(|r| into_decision(r.allow, r.reason, r.obligations))
                .collect(),
            Ok(body) => {
                warn!(
                    expected = queries.len(),
                    got = body.results.len(),
                    "PDP batch result count mismatch"
                );
                vec![Decision::Unavailable; queries.len()]
            }
            Err(e) => {
                warn!(error = %e, "PDP batch response could not be parsed");
                vec![Decision::Unavailable; queries.len()]
            }
        }
    }
}

fn into_decision(allow: bool, reason: Option<String>, obligations: Option<Obligations>) -> Decision {
    if allow {
        Decision::Allowed {
            reason: reason.unwrap_or_else(|| "Policy allowed".to_string()),
            obligations: obligations.unwrap_or_default(),
        }
    } else {
        Decision::Denied {
            reason: reason.unwrap_or_else(|| "Policy denied".to_string()),
        }
    }
}
