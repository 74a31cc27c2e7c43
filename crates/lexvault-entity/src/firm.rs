//! Firm (tenant) entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A tenant organization using the platform.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Firm {
    /// Unique firm identifier.
    pub id: Uuid,
    /// Firm display name.
    pub name: String,
    /// When the firm was created.
    pub created_at: DateTime<Utc>,
}
