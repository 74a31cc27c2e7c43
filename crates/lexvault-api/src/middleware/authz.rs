//! Route authorization middleware.
//!
//! Looks the matched route up in the policy table, authenticates the
//! principal, and for protected routes runs the authorization gate.
//! The verified principal and any verdict obligations are stashed in
//! request extensions for handlers.

use std::collections::HashMap;

use axum::body::{Body, to_bytes};
use axum::extract::{FromRequestParts, MatchedPath, Query, RawPathParams, Request, State};
use axum::middleware::Next;
use axum::response::Response;

use lexvault_core::error::AppError;
use lexvault_policy::{AuthorizationRequest, Obligations, RequestMeta, RoutePolicy};

use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// Bound on how much of a request body is buffered for attribute
/// extraction.
const BODY_LIMIT: usize = 1024 * 1024;

/// Obligations attached to the request by an allow verdict.
#[derive(Debug, Clone, Default)]
pub struct RequestObligations(pub Obligations);

/// The authorization middleware. Added with `route_layer` so the
/// matched route pattern is available.
pub async fn authorize(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (mut parts, body) = request.into_parts();

    let route = parts
        .extensions
        .get::<MatchedPath>()
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| parts.uri.path().to_string());
    let policy = state.route_policies.policy_for(parts.method.as_str(), &route);

    if policy == RoutePolicy::Public {
        return Ok(next.run(Request::from_parts(parts, body)).await);
    }

    let user = CurrentUser::from_request_parts(&mut parts, &state).await?;

    let (body, obligations) = match &policy {
        RoutePolicy::Protected(required) => {
            let path_params = raw_path_params(&mut parts, &state).await;
            let query_params = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
                .map(|q| q.0)
                .unwrap_or_default();

            let bytes = to_bytes(body, BODY_LIMIT)
                .await
                .map_err(|e| AppError::validation(format!("Failed to read request body: {e}")))?;
            let body_json = if bytes.is_empty() {
                None
            } else {
                serde_json::from_slice::<serde_json::Value>(&bytes).ok()
            };

            let meta = RequestMeta {
                method: parts.method.to_string(),
                path: parts.uri.path().to_string(),
                ip_address: header_str(&parts.headers, "x-forwarded-for")
                    .unwrap_or_else(|| "unknown".to_string()),
                user_agent: header_str(&parts.headers, "user-agent"),
            };

            let obligations = state
                .authz_gate
                .authorize(AuthorizationRequest {
                    principal: &user.0,
                    required,
                    path_params: &path_params,
                    query_params: &query_params,
                    body: body_json.as_ref(),
                    meta,
                })
                .await?;

            (Body::from(bytes), obligations)
        }
        _ => (body, Obligations::new()),
    };

    parts.extensions.insert(user.0);
    parts.extensions.insert(RequestObligations(obligations));

    Ok(next.run(Request::from_parts(parts, body)).await)
}

async fn raw_path_params(
    parts: &mut axum::http::request::Parts,
    state: &AppState,
) -> HashMap<String, String> {
    match RawPathParams::from_request_parts(parts, state).await {
        Ok(params) => params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        Err(_) => HashMap::new(),
    }
}

fn header_str(headers: &axum::http::HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}
