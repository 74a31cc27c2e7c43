//! Matter share repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use lexvault_core::error::{AppError, ErrorKind};
use lexvault_core::result::AppResult;
use lexvault_entity::matter_share::{CreateMatterShare, MatterShare, ShareStatus};

/// Repository for matter share CRUD and lifecycle queries.
#[derive(Debug, Clone)]
pub struct MatterShareRepository {
    pool: PgPool,
}

impl MatterShareRepository {
    /// Create a new matter share repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a share by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MatterShare>> {
        sqlx::query_as::<_, MatterShare>("SELECT * FROM matter_shares WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find share", e))
    }

    /// Find the share for a (matter, recipient firm) pair, if any.
    pub async fn find_by_matter_and_firm(
        &self,
        matter_id: Uuid,
        recipient_firm_id: Uuid,
    ) -> AppResult<Option<MatterShare>> {
        sqlx::query_as::<_, MatterShare>(
            "SELECT * FROM matter_shares WHERE matter_id = $1 AND recipient_firm_id = $2",
        )
        .bind(matter_id)
        .bind(recipient_firm_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find share by pair", e)
        })
    }

    /// List all shares of a matter.
    pub async fn find_by_matter(&self, matter_id: Uuid) -> AppResult<Vec<MatterShare>> {
        sqlx::query_as::<_, MatterShare>(
            "SELECT * FROM matter_shares WHERE matter_id = $1 ORDER BY created_at DESC",
        )
        .bind(matter_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list shares by matter", e)
        })
    }

    /// List shares received by a firm, optionally filtered by status.
    pub async fn find_by_recipient_firm(
        &self,
        firm_id: Uuid,
        status: Option<ShareStatus>,
    ) -> AppResult<Vec<MatterShare>> {
        match status {
            Some(status) => sqlx::query_as::<_, MatterShare>(
                "SELECT * FROM matter_shares WHERE recipient_firm_id = $1 AND status = $2 \
                 ORDER BY created_at DESC",
            )
            .bind(firm_id)
            .bind(status)
            .fetch_all(&self.pool)
            .await,
            None => sqlx::query_as::<_, MatterShare>(
                "SELECT * FROM matter_shares WHERE recipient_firm_id = $1 \
                 ORDER BY created_at DESC",
            )
            .bind(firm_id)
            .fetch_all(&self.pool)
            .await,
        }
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list incoming shares", e)
        })
    }

    /// Create a new share in `pending` status.
    pub async fn create(&self, data: &CreateMatterShare) -> AppResult<MatterShare> {
        sqlx::query_as::<_, MatterShare>(
            "INSERT INTO matter_shares (matter_id, owner_firm_id, owner_user_id, recipient_firm_id, \
             role, status, can_download, can_upload, can_comment, can_view_audit, watermark_required, \
             restrictions, expires_at, invitation_message) \
             VALUES ($1, $2, $3, $4, $5, 'pending', $6, $7, $8, $9, $10, $11, $12, $13) RETURNING *",
        )
        .bind(data.matter_id)
        .bind(data.owner_firm_id)
        .bind(data.owner_user_id)
        .bind(data.recipient_firm_id)
        .bind(data.role)
        .bind(data.permissions.can_download)
        .bind(data.permissions.can_upload)
        .bind(data.permissions.can_comment)
        .bind(data.permissions.can_view_audit)
        .bind(data.permissions.watermark_required)
        .bind(&data.restrictions)
        .bind(data.expires_at)
        .bind(&data.invitation_message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create share", e))
    }

    /// Persist the full mutable state of a share.
    pub async fn update(&self, share: &MatterShare) -> AppResult<()> {
        sqlx::query(
            "UPDATE matter_shares SET role = $2, status = $3, can_download = $4, can_upload = $5, \
             can_comment = $6, can_view_audit = $7, watermark_required = $8, restrictions = $9, \
             expires_at = $10, accepted_at = $11, accepted_by_user_id = $12, \
             invitation_message = $13, updated_at = $14 WHERE id = $1",
        )
        .bind(share.id)
        .bind(share.role)
        .bind(share.status)
        .bind(share.permissions.can_download)
        .bind(share.permissions.can_upload)
        .bind(share.permissions.can_comment)
        .bind(share.permissions.can_view_audit)
        .bind(share.permissions.watermark_required)
        .bind(&share.restrictions)
        .bind(share.expires_at)
        .bind(share.accepted_at)
        .bind(share.accepted_by_user_id)
        .bind(&share.invitation_message)
        .bind(share.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update share", e))?;
        Ok(())
    }

    /// Hard-delete a share.
    pub async fn delete(&self, share_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM matter_shares WHERE id = $1")
            .bind(share_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete share", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Flip every accepted share whose expiry has passed to `expired`.
    ///
    /// A single conditional update: rows in any other status are never
    /// touched, and repeated runs with no newly-lapsed rows affect zero
    /// rows. Returns the number of rows mutated.
    pub async fn expire_accepted_past_due(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE matter_shares SET status = 'expired', updated_at = $1 \
             WHERE status = 'accepted' AND expires_at IS NOT NULL AND expires_at < $1",
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to expire shares", e))?;
        Ok(result.rows_affected())
    }
}
