//! Matter share entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use lexvault_core::AppError;

use super::permissions::{SharePermissionOverrides, SharePermissions};
use super::role::CollaborationRole;
use super::status::ShareStatus;

/// A cross-firm collaboration grant on a single matter.
///
/// At most one share exists per (matter, recipient firm) pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatterShare {
    /// Unique share identifier.
    pub id: Uuid,
    /// Matter being shared.
    pub matter_id: Uuid,
    /// Firm that owns the matter and issued the invitation.
    pub owner_firm_id: Uuid,
    /// User at the owning firm who created the share.
    pub owner_user_id: Uuid,
    /// Firm invited to collaborate.
    pub recipient_firm_id: Uuid,
    /// Collaboration role granted to the recipient firm.
    pub role: CollaborationRole,
    /// Lifecycle status.
    pub status: ShareStatus,
    /// Effective permission set.
    #[sqlx(flatten)]
    pub permissions: SharePermissions,
    /// Free-form restrictions (e.g. excluded document categories).
    pub restrictions: serde_json::Value,
    /// When the share lapses; `None` means no expiry.
    pub expires_at: Option<DateTime<Utc>>,
    /// When the invitation was accepted.
    pub accepted_at: Option<DateTime<Utc>>,
    /// Recipient-firm user who accepted.
    pub accepted_by_user_id: Option<Uuid>,
    /// Message attached to the invitation.
    pub invitation_message: Option<String>,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
    /// When the share was last updated.
    pub updated_at: DateTime<Utc>,
}

impl MatterShare {
    /// Returns whether the share has lapsed past its expiry, evaluated
    /// live from `expires_at` rather than the stored status.
    pub fn expired_by_time(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| e <= now)
    }

    /// Returns whether the given firm is a party to this share.
    pub fn involves_firm(&self, firm_id: Uuid) -> bool {
        self.owner_firm_id == firm_id || self.recipient_firm_id == firm_id
    }

    /// Applies a status transition, stamping or clearing the acceptance
    /// fields as the state machine requires.
    ///
    /// Fails with `Validation` when the transition is not allowed.
    pub fn apply_status(
        &mut self,
        next: ShareStatus,
        actor_user_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if !self.status.can_transition_to(next) {
            return Err(AppError::validation(format!(
                "Invalid share status transition: {} -> {}",
                self.status, next
            )));
        }

        match next {
            ShareStatus::Accepted => {
                self.accepted_at = Some(now);
                self.accepted_by_user_id = actor_user_id;
            }
            ShareStatus::Declined | ShareStatus::Revoked => {
                self.accepted_at = None;
                self.accepted_by_user_id = None;
            }
            // Expiry keeps the acceptance record; the share *was* accepted.
            ShareStatus::Pending | ShareStatus::Expired => {}
        }

        self.status = next;
        self.updated_at = now;
        Ok(())
    }

    /// Merges a permission patch into the current set (caller wins per key).
    pub fn merge_permissions(&mut self, overrides: &SharePermissionOverrides) {
        self.permissions = self.permissions.merged_with(overrides);
    }

    /// Merges restriction keys into the current restriction map.
    ///
    /// Existing keys not named in the patch are preserved.
    pub fn merge_restrictions(&mut self, patch: &serde_json::Value) {
        if let (Some(current), Some(incoming)) =
            (self.restrictions.as_object_mut(), patch.as_object())
        {
            for (k, v) in incoming {
                current.insert(k.clone(), v.clone());
            }
        } else if patch.is_object() {
            self.restrictions = patch.clone();
        }
    }
}

/// Data required to create a new matter share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMatterShare {
    /// Matter being shared.
    pub matter_id: Uuid,
    /// Owning firm.
    pub owner_firm_id: Uuid,
    /// User creating the share.
    pub owner_user_id: Uuid,
    /// Recipient firm.
    pub recipient_firm_id: Uuid,
    /// Collaboration role.
    pub role: CollaborationRole,
    /// Effective permissions (role defaults merged with overrides).
    pub permissions: SharePermissions,
    /// Free-form restrictions.
    pub restrictions: serde_json::Value,
    /// Optional expiry.
    pub expires_at: Option<DateTime<Utc>>,
    /// Optional invitation message.
    pub invitation_message: Option<String>,
}

/// Patch applied to an existing share.
///
/// Permission and restriction maps are merged, never replaced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMatterShare {
    /// Requested status transition.
    pub status: Option<ShareStatus>,
    /// Permission overrides.
    #[serde(default)]
    pub permissions: SharePermissionOverrides,
    /// Restriction keys to merge.
    pub restrictions: Option<serde_json::Value>,
    /// New expiry (`Some(None)` clears it).
    pub expires_at: Option<Option<DateTime<Utc>>>,
    /// New invitation message.
    pub invitation_message: Option<String>,
}
