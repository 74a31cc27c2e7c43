//! Firm repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use lexvault_core::error::{AppError, ErrorKind};
use lexvault_core::result::AppResult;
use lexvault_entity::firm::Firm;

/// Repository for firm lookups.
#[derive(Debug, Clone)]
pub struct FirmRepository {
    pool: PgPool,
}

impl FirmRepository {
    /// Create a new firm repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a firm by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Firm>> {
        sqlx::query_as::<_, Firm>("SELECT * FROM firms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find firm", e))
    }

    /// Check whether a firm exists.
    pub async fn exists(&self, id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM firms WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check firm existence", e)
            })
    }
}
