//! Matter entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A legal case or engagement owned by one firm.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Matter {
    /// Unique matter identifier.
    pub id: Uuid,
    /// Owning firm.
    pub firm_id: Uuid,
    /// Matter title.
    pub title: String,
    /// Internal matter number.
    pub matter_number: Option<String>,
    /// When the matter was created.
    pub created_at: DateTime<Utc>,
}
