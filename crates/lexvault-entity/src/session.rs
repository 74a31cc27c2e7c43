//! Server-side session record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::principal::UserInfo;

/// A server-held session keyed by a client-presented cookie.
///
/// Created at login/token-exchange, refreshed in place when the access
/// credential lapses but a refresh credential exists, destroyed on logout
/// or irrecoverable refresh failure.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuthSession {
    /// Session identifier (the cookie value).
    pub id: Uuid,
    /// Resolved principal snapshot at issue/refresh time.
    #[sqlx(json)]
    pub principal: UserInfo,
    /// Current access credential.
    pub access_token: String,
    /// Refresh credential; absent for bearer-header sessions.
    pub refresh_token: Option<String>,
    /// When the access credential expires.
    pub access_expires_at: DateTime<Utc>,
    /// When the session was created.
    pub issued_at: DateTime<Utc>,
    /// Absolute session expiry, independent of refresh activity.
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    /// Returns whether the access credential has lapsed.
    pub fn access_expired(&self, now: DateTime<Utc>) -> bool {
        self.access_expires_at <= now
    }

    /// Returns whether the session itself has passed its absolute expiry.
    pub fn session_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::collections::HashMap;

    fn session(access_in: i64, absolute_in: i64) -> AuthSession {
        let now = Utc::now();
        AuthSession {
            id: Uuid::new_v4(),
            principal: UserInfo {
                subject: "s".to_string(),
                user_id: None,
                email: "e".to_string(),
                display_name: "d".to_string(),
                roles: vec![],
                firm_id: None,
                attributes: HashMap::new(),
                clearance_level: None,
            },
            access_token: "at".to_string(),
            refresh_token: None,
            access_expires_at: now + Duration::seconds(access_in),
            issued_at: now,
            expires_at: now + Duration::seconds(absolute_in),
        }
    }

    #[test]
    fn test_expiry_checks() {
        let now = Utc::now();
        assert!(!session(60, 3600).access_expired(now));
        assert!(session(-1, 3600).access_expired(now));
        assert!(session(-1, -1).session_expired(now));
    }
}
