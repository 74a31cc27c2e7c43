//! Platform user record used to enrich identity-token claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted user profile.
///
/// The canonical firm ID and roles here supersede whatever the identity
/// token claims during principal resolution.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Identity-provider subject this profile is linked to.
    pub subject: String,
    /// Email address.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Owning firm; `None` for external partner accounts.
    pub firm_id: Option<Uuid>,
    /// Role strings granted to this user.
    pub roles: Vec<String>,
    /// Optional clearance level.
    pub clearance_level: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}
