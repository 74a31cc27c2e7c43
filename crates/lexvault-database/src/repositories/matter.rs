//! Matter repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use lexvault_core::error::{AppError, ErrorKind};
use lexvault_core::result::AppResult;
use lexvault_entity::matter::Matter;

/// Repository for matter lookups.
#[derive(Debug, Clone)]
pub struct MatterRepository {
    pool: PgPool,
}

impl MatterRepository {
    /// Create a new matter repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a matter by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Matter>> {
        sqlx::query_as::<_, Matter>("SELECT * FROM matters WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find matter", e))
    }
}
