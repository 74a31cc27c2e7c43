//! Deterministic in-process fallback decision engine.
//!
//! Consulted whenever the external decision point is disabled, times
//! out, or errors. A pure function of the principal's roles and firm,
//! the action, and the resource; first matching rule wins.

use uuid::Uuid;

use lexvault_entity::principal::UserInfo;

use crate::decision::{Decision, PolicyResource};

const READ_ROLES: &[&str] = &["legal_professional", "legal_manager", "client_user"];
const WRITE_ROLES: &[&str] = &["legal_professional", "legal_manager"];
const ADMIN_ROLES: &[&str] = &["firm_admin", "legal_manager"];

/// Role-based rule table mirroring the decision point's baseline policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackEngine;

impl FallbackEngine {
    /// Creates the engine.
    pub fn new() -> Self {
        Self
    }

    /// Evaluates a query against the rule table. Never returns
    /// [`Decision::Unavailable`].
    pub fn decide(
        &self,
        principal: &UserInfo,
        action: &str,
        resource: &PolicyResource,
    ) -> Decision {
        if principal.has_role("super_admin") {
            return Decision::allowed("Super admin access");
        }

        if principal.has_role("firm_admin") && same_firm(principal, resource) {
            return Decision::allowed("Firm admin access");
        }

        if action == "read" && principal.has_any_role(READ_ROLES) {
            return Decision::allowed("Role-based read access");
        }

        if matches!(action, "write" | "update") && principal.has_any_role(WRITE_ROLES) {
            return Decision::allowed("Role-based write access");
        }

        if action == "delete" && principal.has_role("legal_manager") {
            return Decision::allowed("Role-based delete access");
        }

        if action == "admin" && principal.has_any_role(ADMIN_ROLES) {
            return Decision::allowed("Role-based admin access");
        }

        Decision::denied(format!(
            "No rule grants roles [{}] action '{}' on resource type '{}'",
            principal.roles.join(", "),
            action,
            resource.resource_type
        ))
    }
}

/// Compares the resource's firm attribute with the principal's firm.
///
/// False whenever either firm ID is absent.
fn same_firm(principal: &UserInfo, resource: &PolicyResource) -> bool {
    let Some(principal_firm) = principal.firm_id else {
        return false;
    };
    resource
        .attributes
        .get("firm_id")
        .and_then(|v| v.as_str())
        .and_then(|s| Uuid::parse_str(s).ok())
        .is_some_and(|resource_firm| resource_firm == principal_firm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn principal(roles: &[&str], firm_id: Option<Uuid>) -> UserInfo {
        UserInfo {
            subject: "auth0|t".to_string(),
            user_id: Some(Uuid::new_v4()),
            email: "t@firm.test".to_string(),
            display_name: "T".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            firm_id,
            attributes: HashMap::new(),
            clearance_level: None,
        }
    }

    fn resource(resource_type: &str, firm_id: Option<Uuid>) -> PolicyResource {
        let mut attributes = serde_json::Map::new();
        if let Some(firm_id) = firm_id {
            attributes.insert(
                "firm_id".to_string(),
                serde_json::Value::String(firm_id.to_string()),
            );
        }
        PolicyResource {
            resource_type: resource_type.to_string(),
            id: None,
            attributes,
        }
    }

    #[test]
    fn test_super_admin_allows_anything() {
        let engine = FallbackEngine::new();
        let p = principal(&["super_admin"], None);
        let d = engine.decide(&p, "delete", &resource("document", None));
        assert!(d.is_allowed());
        assert_eq!(
            d,
            Decision::allowed("Super admin access"),
        );
    }

    #[test]
    fn test_firm_admin_requires_matching_firm() {
        let engine = FallbackEngine::new();
        let firm = Uuid::new_v4();
        let p = principal(&["firm_admin"], Some(firm));

        assert!(engine
            .decide(&p, "delete", &resource("matter", Some(firm)))
            .is_allowed());
        assert!(!engine
            .decide(&p, "delete", &resource("matter", Some(Uuid::new_v4())))
            .is_allowed());
        // Absent firm on either side never matches.
        assert!(!engine
            .decide(&p, "delete", &resource("matter", None))
            .is_allowed());
        let no_firm = principal(&["firm_admin"], None);
        assert!(!engine
            .decide(&no_firm, "delete", &resource("matter", Some(firm)))
            .is_allowed());
    }

    #[test]
    fn test_read_rules() {
        let engine = FallbackEngine::new();
        let r = resource("document", None);
        assert!(!engine.decide(&principal(&[], None), "read", &r).is_allowed());
        assert!(engine
            .decide(&principal(&["legal_professional"], None), "read", &r)
            .is_allowed());
        assert!(engine
            .decide(&principal(&["client_user"], None), "read", &r)
            .is_allowed());
    }

    #[test]
    fn test_write_rules() {
        let engine = FallbackEngine::new();
        let r = resource("document", None);
        assert!(engine
            .decide(&principal(&["legal_manager"], None), "write", &r)
            .is_allowed());
        assert!(engine
            .decide(&principal(&["legal_professional"], None), "update", &r)
            .is_allowed());
        assert!(!engine
            .decide(&principal(&["client_user"], None), "write", &r)
            .is_allowed());
    }

    #[test]
    fn test_delete_requires_legal_manager() {
        let engine = FallbackEngine::new();
        let r = resource("document", None);
        assert!(engine
            .decide(&principal(&["legal_manager"], None), "delete", &r)
            .is_allowed());
        assert!(!engine
            .decide(&principal(&["legal_professional"], None), "delete", &r)
            .is_allowed());
    }

    #[test]
    fn test_admin_rules() {
        let engine = FallbackEngine::new();
        let r = resource("firm", None);
        assert!(engine
            .decide(&principal(&["firm_admin"], None), "admin", &r)
            .is_allowed());
        assert!(engine
            .decide(&principal(&["legal_manager"], None), "admin", &r)
            .is_allowed());
        assert!(!engine
            .decide(&principal(&["legal_professional"], None), "admin", &r)
            .is_allowed());
    }

    #[test]
    fn test_denial_reason_names_roles_action_and_resource() {
        let engine = FallbackEngine::new();
        let p = principal(&["client_user"], None);
        let Decision::Denied { reason } =
            engine.decide(&p, "delete", &resource("document", None))
        else {
            panic!("expected denial");
        };
        assert!(reason.contains("client_user"));
        assert!(reason.contains("delete"));
        assert!(reason.contains("document"));
    }
}
