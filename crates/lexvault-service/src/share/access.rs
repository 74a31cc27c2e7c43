//! Shared-document access mediation.
//!
//! Decides whether a principal may receive a document under a share,
//! whether the release crosses the firm boundary, and whether the
//! response must be watermarked. Expiry is evaluated live from
//! `expires_at` so a lapsed share is refused even before the periodic
//! sweep has persisted the `expired` status.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use lexvault_core::error::AppError;
use lexvault_core::result::AppResult;
use lexvault_entity::document::{ConfidentialityLabel, Document};
use lexvault_entity::matter_share::{MatterShare, SharePermissions, ShareStatus};
use lexvault_entity::principal::UserInfo;

use super::store::{DocumentStore, ShareStore};

/// The outcome of a successful mediation.
#[derive(Debug, Clone, Serialize)]
pub struct SharedDocumentAccess {
    /// The document cleared for release.
    pub document: Document,
    /// Effective permissions of the share the access rides on.
    pub permissions: SharePermissions,
    /// True when the requester is the recipient firm, not the owner.
    pub is_external_access: bool,
    /// Label to stamp when `watermark` demands it.
    pub confidentiality_label: ConfidentialityLabel,
    /// Whether the caller must watermark the released bytes.
    pub watermark: bool,
}

/// Mediates cross-firm document access under a matter share.
#[derive(Clone)]
pub struct SharedDocumentMediator {
    shares: Arc<dyn ShareStore>,
    documents: Arc<dyn DocumentStore>,
}

impl SharedDocumentMediator {
    pub fn new(shares: Arc<dyn ShareStore>, documents: Arc<dyn DocumentStore>) -> Self {
        Self { shares, documents }
    }

    /// Validates the (share, document, principal) triple and prepares
    /// the release, or fails with the first violated check.
    ///
    /// Share liveness is settled before the document is even looked up,
    /// so a dead share refuses with the same error whether or not the
    /// document exists.
    pub async fn authorize_and_prepare(
        &self,
        caller: &UserInfo,
        share_id: Uuid,
        document_id: Uuid,
    ) -> AppResult<SharedDocumentAccess> {
        let share = self
            .shares
            .find_by_id(share_id)
            .await?
            .ok_or_else(|| AppError::not_found("Share not found"))?;
        check_liveness(&share, Utc::now())?;

        let document = self
            .documents
            .find_by_id(document_id)
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))?;

        let access = evaluate_access(&share, &document, caller, Utc::now())?;
        info!(
            share_id = %share.id,
            document_id = %document.id,
            external = access.is_external_access,
            watermark = access.watermark,
            "shared document access granted"
        );
        Ok(access)
    }
}

/// Refuses any share that cannot carry an access right now: only
/// `accepted` passes, and a lapsed `expires_at` refuses even before
/// the periodic sweep has persisted the `expired` status.
fn check_liveness(share: &MatterShare, now: DateTime<Utc>) -> AppResult<()> {
    match share.status {
        ShareStatus::Revoked => return Err(AppError::forbidden("Share has been revoked")),
        ShareStatus::Expired => return Err(AppError::forbidden("Share has expired")),
        ShareStatus::Pending | ShareStatus::Declined => {
            return Err(AppError::forbidden("Share is not active"));
        }
        ShareStatus::Accepted => {}
    }
    if share.expired_by_time(now) {
        return Err(AppError::forbidden("Share has expired"));
    }
    Ok(())
}

/// Pure evaluation of one access attempt.
///
/// Check order: share liveness, document-matter membership, requester
/// firm membership. The watermark triggers exactly when the document
/// is a PDF and the access crosses the firm boundary.
pub fn evaluate_access(
    share: &MatterShare,
    document: &Document,
    caller: &UserInfo,
    now: DateTime<Utc>,
) -> AppResult<SharedDocumentAccess> {
    check_liveness(share, now)?;

    if document.matter_id != share.matter_id {
        return Err(AppError::not_found("Document not found"));
    }

    let caller_firm = caller
        .firm_id
        .ok_or_else(|| AppError::forbidden("User is not associated with a firm"))?;
    if !share.involves_firm(caller_firm) {
        return Err(AppError::forbidden(
            "Firm is not a party to this share",
        ));
    }

    let is_external_access = caller_firm == share.recipient_firm_id;
    let watermark = document.is_pdf() && is_external_access;

    Ok(SharedDocumentAccess {
        confidentiality_label: document.confidentiality_label(),
        permissions: share.permissions,
        document: document.clone(),
        is_external_access,
        watermark,
    })
}
