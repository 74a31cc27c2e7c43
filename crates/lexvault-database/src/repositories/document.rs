//! Document metadata repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use lexvault_core::error::{AppError, ErrorKind};
use lexvault_core::result::AppResult;
use lexvault_entity::document::Document;

/// Repository for document metadata lookups.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a document by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find document", e))
    }
}
