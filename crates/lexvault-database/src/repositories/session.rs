//! Session repository implementation.

use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use lexvault_core::error::{AppError, ErrorKind};
use lexvault_core::result::AppResult;
use lexvault_entity::session::AuthSession;

/// Repository for server-side session records.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a session by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AuthSession>> {
        sqlx::query_as::<_, AuthSession>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find session", e))
    }

    /// Insert or fully replace a session record.
    ///
    /// Upsert semantics give last-write-wins for concurrent refreshes on
    /// the same session id.
    pub async fn upsert(&self, session: &AuthSession) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO sessions (id, principal, access_token, refresh_token, \
             access_expires_at, issued_at, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (id) DO UPDATE SET principal = $2, access_token = $3, \
             refresh_token = $4, access_expires_at = $5, expires_at = $7",
        )
        .bind(session.id)
        .bind(Json(&session.principal))
        .bind(&session.access_token)
        .bind(&session.refresh_token)
        .bind(session.access_expires_at)
        .bind(session.issued_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert session", e))?;
        Ok(())
    }

    /// Delete a session record.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete session", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
