//! Authorization query and decision types.
//!
//! Decisions are an explicit tagged result threaded through the PDP
//! client and the fallback engine; they are converted to HTTP errors
//! only at the authorization gate boundary.

use serde::{Deserialize, Serialize};

use lexvault_entity::principal::UserInfo;

/// Side-conditions a verdict attaches to an allow (e.g. "must watermark").
pub type Obligations = serde_json::Map<String, serde_json::Value>;

/// The resource an action targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyResource {
    /// Resource type tag, e.g. `document`, `matter`, `client`.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Resource identifier, when one is addressed.
    pub id: Option<String>,
    /// Opaque attributes passed through to the decision point.
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

/// Request-level context forwarded with every query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestMeta {
    /// HTTP method.
    pub method: String,
    /// Request path.
    pub path: String,
    /// Network origin.
    pub ip_address: String,
    /// User-Agent header value.
    pub user_agent: Option<String>,
}

/// A single authorization query: who, what, where.
///
/// Created fresh per authorization check; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyQuery {
    /// The acting principal.
    pub principal: UserInfo,
    /// Action tag: `read`, `write`, `update`, `delete`, `admin`.
    pub action: String,
    /// Target resource.
    pub resource: PolicyResource,
    /// Request context.
    pub context: RequestMeta,
}

/// Outcome of a policy evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Access granted, possibly with obligations the caller must enforce.
    Allowed {
        /// Human-readable reason.
        reason: String,
        /// Side-conditions attached to the allow.
        obligations: Obligations,
    },
    /// Access denied.
    Denied {
        /// Human-readable reason.
        reason: String,
    },
    /// The decision point could not be reached; the caller must fall back.
    Unavailable,
}

impl Decision {
    /// Returns whether this decision grants access.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Constructs an allow without obligations.
    pub fn allowed(reason: impl Into<String>) -> Self {
        Self::Allowed {
            reason: reason.into(),
            obligations: Obligations::new(),
        }
    }

    /// Constructs a denial.
    pub fn denied(reason: impl Into<String>) -> Self {
        Self::Denied {
            reason: reason.into(),
        }
    }
}
