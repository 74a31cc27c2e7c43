//! Static route-to-permission table.
//!
//! Routes are keyed by HTTP method and the matched route pattern (the
//! template with `{param}` placeholders, not the concrete path). Routes
//! absent from the table require authentication but no specific
//! permission.

use std::collections::HashMap;

/// The permission a protected route demands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredPermission {
    /// Action tag: `read`, `write`, `update`, `delete`, `admin`.
    pub action: &'static str,
    /// Resource type the route operates on.
    pub resource_type: &'static str,
}

/// Policy class of a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePolicy {
    /// No authentication required.
    Public,
    /// Requires a valid principal, no permission check.
    AuthenticatedOnly,
    /// Requires a valid principal and a policy verdict.
    Protected(RequiredPermission),
}

/// Lookup table from (method, route pattern) to policy class.
#[derive(Debug, Default)]
pub struct RoutePolicyTable {
    entries: HashMap<(&'static str, &'static str), RoutePolicy>,
}

impl RoutePolicyTable {
    /// Builds the table for the full API surface.
    pub fn new() -> Self {
        let mut table = Self::default();

        table.public("GET", "/health");
        table.public("GET", "/api/auth/callback");
        table.authenticated("POST", "/api/auth/refresh");
        table.authenticated("POST", "/api/auth/logout");
        table.authenticated("GET", "/api/auth/me");

        table.protect("POST", "/api/shares", "write", "matter_share");
        table.protect("GET", "/api/shares/{id}", "read", "matter_share");
        table.protect("PATCH", "/api/shares/{id}", "update", "matter_share");
        table.protect("DELETE", "/api/shares/{id}", "delete", "matter_share");
        table.protect("POST", "/api/shares/{id}/accept", "update", "matter_share");
        table.protect("POST", "/api/shares/{id}/decline", "update", "matter_share");
        table.protect("GET", "/api/matters/{id}/shares", "read", "matter_share");
        table.protect("GET", "/api/shares/incoming", "read", "matter_share");

        table.protect(
            "GET",
            "/api/shares/{id}/documents/{document_id}",
            "read",
            "document",
        );

        table
    }

    /// Resolves the policy for a matched route. Unknown routes default
    /// to [`RoutePolicy::AuthenticatedOnly`].
    pub fn policy_for(&self, method: &str, route: &str) -> RoutePolicy {
        self.entries
            .get(&(method, route))
            .cloned()
            .unwrap_or(RoutePolicy::AuthenticatedOnly)
    }

    fn public(&mut self, method: &'static str, route: &'static str) {
        self.entries.insert((method, route), RoutePolicy::Public);
    }

    fn authenticated(&mut self, method: &'static str, route: &'static str) {
        self.entries
            .insert((method, route), RoutePolicy::AuthenticatedOnly);
    }

    fn protect(
        &mut self,
        method: &'static str,
        route: &'static str,
        action: &'static str,
        resource_type: &'static str,
    ) {
        self.entries.insert(
            (method, route),
            RoutePolicy::Protected(RequiredPermission {
                action,
                resource_type,
            }),
        );
    }
}
