//! Authorization gate.
//!
//! Builds a policy query from an authenticated request, consults the
//! external decision point, and falls back to the in-process engine
//! whenever the decision point is unavailable. Denials and fallback
//! activations are logged; verdicts are converted to errors here so
//! callers only see `Ok(obligations)` or a `Forbidden` error.

use std::collections::HashMap;

use tracing::{info, warn};

use lexvault_core::error::AppError;
use lexvault_entity::principal::UserInfo;

use crate::decision::{Decision, Obligations, PolicyQuery, PolicyResource, RequestMeta};
use crate::fallback::FallbackEngine;
use crate::pdp::PdpClient;
use crate::routes::RequiredPermission;

/// Path parameter names probed for a resource identifier, in
/// precedence order.
const RESOURCE_ID_PARAMS: &[&str] = &["id", "resourceId", "documentId", "matterId", "clientId"];

/// Everything the gate needs to evaluate one request.
#[derive(Debug)]
pub struct AuthorizationRequest<'a> {
    /// The authenticated principal.
    pub principal: &'a UserInfo,
    /// Action and resource type demanded by the matched route.
    pub required: &'a RequiredPermission,
    /// Path parameters extracted by the router.
    pub path_params: &'a HashMap<String, String>,
    /// Query string parameters.
    pub query_params: &'a HashMap<String, String>,
    /// Parsed JSON request body, when one was present.
    pub body: Option<&'a serde_json::Value>,
    /// Request context forwarded to the decision point.
    pub meta: RequestMeta,
}

/// Evaluates authorization for protected routes.
pub struct AuthorizationGate {
    pdp: PdpClient,
    fallback: FallbackEngine,
}

impl AuthorizationGate {
    pub fn new(pdp: PdpClient) -> Self {
        Self {
            pdp,
            fallback: FallbackEngine::new(),
        }
    }

    /// Evaluates a request. Returns the obligations attached to an
    /// allow, or `Forbidden` carrying the policy reason.
    pub async fn authorize(
        &self,
        request: AuthorizationRequest<'_>,
    ) -> Result<Obligations, AppError> {
        let query = build_query(&request);

        let (decision, source) = match self.pdp.decide(&query).await {
            Decision::Unavailable => {
                warn!(
                    action = %query.action,
                    resource_type = %query.resource.resource_type,
                    "policy decision point unavailable, using fallback engine"
                );
                (
                    self.fallback
                        .decide(&query.principal, &query.action, &query.resource),
                    "fallback",
                )
            }
            verdict => (verdict, "pdp"),
        };

        match decision {
            Decision::Allowed { obligations, .. } => Ok(obligations),
            Decision::Denied { reason } => {
                info!(
                    subject = %query.principal.subject,
                    action = %query.action,
                    resource_type = %query.resource.resource_type,
                    resource_id = ?query.resource.id,
                    source,
                    %reason,
                    "authorization denied"
                );
                Err(AppError::forbidden(reason))
            }
            // The fallback engine never returns Unavailable.
            Decision::Unavailable => {
                Err(AppError::forbidden("authorization check failed"))
            }
        }
    }
}

/// Assembles the policy query from the request parts.
fn build_query(request: &AuthorizationRequest<'_>) -> PolicyQuery {
    let mut attributes = serde_json::Map::new();

    if let Some(serde_json::Value::Object(fields)) = request.body {
        for (key, value) in fields {
            attributes.insert(key.clone(), value.clone());
        }
    }
    for (key, value) in request.query_params {
        attributes.insert(key.clone(), serde_json::Value::String(value.clone()));
    }

    // Writes to client records are always scoped to the caller's own
    // firm, regardless of what the body claims.
    if request.required.resource_type == "client"
        && matches!(request.required.action, "write" | "update")
    {
        let firm = request
            .principal
            .firm_id
            .map(|id| serde_json::Value::String(id.to_string()))
            .unwrap_or(serde_json::Value::Null);
        attributes.insert("firm_id".to_string(), firm);
    }

    let id = RESOURCE_ID_PARAMS
        .iter()
        .find_map(|name| request.path_params.get(*name))
        .cloned();

    PolicyQuery {
        principal: request.principal.clone(),
        action: request.required.action.to_string(),
        resource: PolicyResource {
            resource_type: request.required.resource_type.to_string(),
            id,
            attributes,
        },
        context: request.meta.clone(),
    }
}
