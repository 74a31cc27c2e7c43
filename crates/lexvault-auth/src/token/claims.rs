//! Identity token claims.

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by an identity-provider access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdClaims {
    /// Subject: the identity-provider user ID.
    pub sub: String,
    /// Issuer base URL.
    pub iss: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Firm the token claims membership of.
    #[serde(default)]
    pub firm_id: Option<Uuid>,
    /// Role strings the token claims.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Optional clearance level.
    #[serde(default)]
    pub clearance_level: Option<String>,
    /// Freeform attribute claims (e.g. accessible client IDs).
    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,
}

impl IdClaims {
    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_expired() {
        let mut claims = IdClaims {
            sub: "auth0|x".to_string(),
            iss: "https://idp.test".to_string(),
            exp: Utc::now().timestamp() + 60,
            iat: Utc::now().timestamp(),
            email: None,
            name: None,
            firm_id: None,
            roles: vec![],
            clearance_level: None,
            attributes: HashMap::new(),
        };
        assert!(!claims.is_expired());
        claims.exp = Utc::now().timestamp() - 1;
        assert!(claims.is_expired());
    }

    #[test]
    fn test_attribute_claims_flow_through() {
        let claims: IdClaims = serde_json::from_value(serde_json::json!({
            "sub": "auth0|x",
            "iss": "https://idp.test",
            "exp": Utc::now().timestamp() + 60,
            "iat": Utc::now().timestamp(),
            "attributes": {"client_ids": ["c-1", "c-2"]}
        }))
        .unwrap();
        assert_eq!(claims.attributes["client_ids"][0], "c-1");
        assert_eq!(claims.attributes["client_ids"][1], "c-2");
    }
}
