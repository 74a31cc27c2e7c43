//! The authenticated principal attached to a request.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The verified identity attached to a request by the authentication gate.
///
/// Immutable for the lifetime of one request. Token claims are merged with
/// the persisted user profile when one exists; the profile's firm ID and
/// roles supersede the token's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    /// Subject identifier from the identity token.
    pub subject: String,
    /// Platform user ID, when a persisted profile exists for the subject.
    pub user_id: Option<Uuid>,
    /// Email address.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Role strings, e.g. `legal_professional`, `firm_admin`.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Owning firm; `None` for cross-firm external partners.
    pub firm_id: Option<Uuid>,
    /// Freeform attributes (may include accessible client IDs).
    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,
    /// Optional clearance level.
    #[serde(default)]
    pub clearance_level: Option<String>,
}

impl UserInfo {
    /// Returns whether the principal carries the given role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Returns whether the principal carries any of the given roles.
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        self.roles.iter().any(|r| roles.contains(&r.as_str()))
    }

    /// Returns whether the principal belongs to the given firm.
    ///
    /// False whenever the principal has no firm.
    pub fn belongs_to_firm(&self, firm_id: Uuid) -> bool {
        self.firm_id == Some(firm_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(roles: &[&str], firm_id: Option<Uuid>) -> UserInfo {
        UserInfo {
            subject: "auth0|abc".to_string(),
            user_id: Some(Uuid::new_v4()),
            email: "a@firm.test".to_string(),
            display_name: "A".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            firm_id,
            attributes: HashMap::new(),
            clearance_level: None,
        }
    }

    #[test]
    fn test_role_checks() {
        let p = principal(&["legal_professional", "firm_admin"], None);
        assert!(p.has_role("firm_admin"));
        assert!(!p.has_role("super_admin"));
        assert!(p.has_any_role(&["super_admin", "legal_professional"]));
        assert!(!p.has_any_role(&["super_admin", "legal_manager"]));
    }

    #[test]
    fn test_belongs_to_firm_requires_firm() {
        let firm = Uuid::new_v4();
        assert!(principal(&[], Some(firm)).belongs_to_firm(firm));
        assert!(!principal(&[], None).belongs_to_firm(firm));
        assert!(!principal(&[], Some(Uuid::new_v4())).belongs_to_firm(firm));
    }
}
