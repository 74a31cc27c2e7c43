//! Matter share lifecycle service.
//!
//! Owns creation, the accept/decline/revoke transitions, updates,
//! deletion, and the periodic expiry sweep. Party checks live here;
//! the status diagram itself is enforced by the entity.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use lexvault_core::error::AppError;
use lexvault_core::result::AppResult;
use lexvault_entity::matter_share::{
    CollaborationRole, CreateMatterShare, MatterShare, SharePermissionOverrides, ShareStatus,
    UpdateMatterShare,
};
use lexvault_entity::principal::UserInfo;

use super::store::{FirmDirectory, MatterDirectory, ShareStore};

/// Caller-facing share creation payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateShareInput {
    /// Matter to share.
    pub matter_id: Uuid,
    /// Firm to invite.
    pub recipient_firm_id: Uuid,
    /// Collaboration role granted.
    pub role: CollaborationRole,
    /// Per-key overrides of the role's default permissions.
    #[serde(default)]
    pub permissions: SharePermissionOverrides,
    /// Free-form restrictions.
    pub restrictions: Option<serde_json::Value>,
    /// Optional expiry.
    pub expires_at: Option<DateTime<Utc>>,
    /// Optional invitation message.
    pub invitation_message: Option<String>,
}

/// Service coordinating the matter share lifecycle.
#[derive(Clone)]
pub struct MatterShareService {
    shares: Arc<dyn ShareStore>,
    matters: Arc<dyn MatterDirectory>,
    firms: Arc<dyn FirmDirectory>,
}

impl MatterShareService {
    pub fn new(
        shares: Arc<dyn ShareStore>,
        matters: Arc<dyn MatterDirectory>,
        firms: Arc<dyn FirmDirectory>,
    ) -> Self {
        Self {
            shares,
            matters,
            firms,
        }
    }

    /// Creates a pending share of a matter with another firm.
    ///
    /// The matter must belong to the caller's firm and the recipient
    /// firm must exist; a second share for the same (matter, firm)
    /// pair fails with `Conflict`.
    pub async fn create_share(
        &self,
        caller: &UserInfo,
        input: CreateShareInput,
    ) -> AppResult<MatterShare> {
        let caller_firm = require_firm(caller)?;
        let caller_user = require_user(caller)?;

        let matter = self
            .matters
            .find_by_id(input.matter_id)
            .await?
            .filter(|m| m.firm_id == caller_firm)
            .ok_or_else(|| AppError::not_found("Matter not found"))?;

        if input.recipient_firm_id == caller_firm {
            return Err(AppError::validation(
                "A matter cannot be shared with its own firm",
            ));
        }
        if !self.firms.exists(input.recipient_firm_id).await? {
            return Err(AppError::not_found("Recipient firm not found"));
        }
        if let Some(expires_at) = input.expires_at {
            if expires_at <= Utc::now() {
                return Err(AppError::validation("Share expiry must be in the future"));
            }
        }
        if self
            .shares
            .find_by_matter_and_firm(matter.id, input.recipient_firm_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "A share already exists for this matter and firm",
            ));
        }

        let permissions = input
            .role
            .default_permissions()
            .merged_with(&input.permissions);

        let share = self
            .shares
            .create(&CreateMatterShare {
                matter_id: matter.id,
                owner_firm_id: caller_firm,
                owner_user_id: caller_user,
                recipient_firm_id: input.recipient_firm_id,
                role: input.role,
                permissions,
                restrictions: input
                    .restrictions
                    .unwrap_or_else(|| serde_json::json!({})),
                expires_at: input.expires_at,
                invitation_message: input.invitation_message,
            })
            .await?;

        info!(
            share_id = %share.id,
            matter_id = %share.matter_id,
            recipient_firm_id = %share.recipient_firm_id,
            role = %share.role,
            "matter share created"
        );
        Ok(share)
    }

    /// Fetches a share visible to the caller's firm.
    pub async fn get_share(&self, caller: &UserInfo, share_id: Uuid) -> AppResult<MatterShare> {
        let caller_firm = require_firm(caller)?;
        self.shares
            .find_by_id(share_id)
            .await?
            .filter(|s| s.involves_firm(caller_firm))
            .ok_or_else(|| AppError::not_found("Share not found"))
    }

    /// Applies a patch to a share.
    ///
    /// Either party may update, but what they may change differs: the
    /// owner revokes and edits grant terms; the recipient accepts or
    /// declines. Permission and restriction maps merge key-by-key.
    pub async fn update_share(
        &self,
        caller: &UserInfo,
        share_id: Uuid,
        patch: UpdateMatterShare,
    ) -> AppResult<MatterShare> {
        let caller_firm = require_firm(caller)?;
        let mut share = self.get_share(caller, share_id).await?;
        let is_owner = share.owner_firm_id == caller_firm;
        let now = Utc::now();

        if let Some(next) = patch.status {
            match next {
                ShareStatus::Accepted | ShareStatus::Declined => {
                    if is_owner {
                        return Err(AppError::forbidden(
                            "Only the recipient firm may accept or decline a share",
                        ));
                    }
                }
                ShareStatus::Revoked => {
                    if !is_owner {
                        return Err(AppError::forbidden(
                            "Only the owning firm may revoke a share",
                        ));
                    }
                }
                ShareStatus::Pending | ShareStatus::Expired => {
                    return Err(AppError::validation(format!(
                        "Share status cannot be set to '{next}' directly"
                    )));
                }
            }
            share.apply_status(next, caller.user_id, now)?;
        }

        let edits_terms = !patch.permissions.is_empty()
            || patch.restrictions.is_some()
            || patch.expires_at.is_some()
            || patch.invitation_message.is_some();
        if edits_terms {
            if !is_owner {
                return Err(AppError::forbidden(
                    "Only the owning firm may change share terms",
                ));
            }
            share.merge_permissions(&patch.permissions);
            if let Some(restrictions) = &patch.restrictions {
                share.merge_restrictions(restrictions);
            }
            if let Some(expires_at) = patch.expires_at {
                share.expires_at = expires_at;
            }
            if let Some(message) = patch.invitation_message {
                share.invitation_message = Some(message);
            }
            share.updated_at = now;
        }

        self.shares.update(&share).await?;
        info!(share_id = %share.id, status = %share.status, "matter share updated");
        Ok(share)
    }

    /// Recipient accepts a pending invitation.
    pub async fn accept_share(&self, caller: &UserInfo, share_id: Uuid) -> AppResult<MatterShare> {
        self.update_share(
            caller,
            share_id,
            UpdateMatterShare {
                status: Some(ShareStatus::Accepted),
                ..Default::default()
            },
        )
        .await
    }

    /// Recipient declines a pending invitation.
    pub async fn decline_share(&self, caller: &UserInfo, share_id: Uuid) -> AppResult<MatterShare> {
        self.update_share(
            caller,
            share_id,
            UpdateMatterShare {
                status: Some(ShareStatus::Declined),
                ..Default::default()
            },
        )
        .await
    }

    /// Owner hard-deletes a share.
    pub async fn delete_share(&self, caller: &UserInfo, share_id: Uuid) -> AppResult<()> {
        let caller_firm = require_firm(caller)?;
        let share = self.get_share(caller, share_id).await?;
        if share.owner_firm_id != caller_firm {
            return Err(AppError::forbidden(
                "Only the owning firm may delete a share",
            ));
        }
        self.shares.delete(share.id).await?;
        info!(share_id = %share.id, "matter share deleted");
        Ok(())
    }

    /// Lists shares of a matter owned by the caller's firm.
    pub async fn list_by_matter(
        &self,
        caller: &UserInfo,
        matter_id: Uuid,
    ) -> AppResult<Vec<MatterShare>> {
        let caller_firm = require_firm(caller)?;
        self.matters
            .find_by_id(matter_id)
            .await?
            .filter(|m| m.firm_id == caller_firm)
            .ok_or_else(|| AppError::not_found("Matter not found"))?;
        self.shares.find_by_matter(matter_id).await
    }

    /// Lists invitations received by the caller's firm.
    pub async fn list_incoming(
        &self,
        caller: &UserInfo,
        status: Option<ShareStatus>,
    ) -> AppResult<Vec<MatterShare>> {
        let caller_firm = require_firm(caller)?;
        self.shares.find_by_recipient_firm(caller_firm, status).await
    }

    /// Flips accepted shares past their expiry to `expired`.
    ///
    /// Returns the number of rows mutated; safe to run repeatedly.
    pub async fn expire_old_shares(&self) -> AppResult<u64> {
        let count = self.shares.expire_accepted_past_due(Utc::now()).await?;
        if count > 0 {
            info!(count, "expired lapsed matter shares");
        }
        Ok(count)
    }
}

fn require_firm(caller: &UserInfo) -> AppResult<Uuid> {
    caller
        .firm_id
        .ok_or_else(|| AppError::forbidden("User is not associated with a firm"))
}

fn require_user(caller: &UserInfo) -> AppResult<Uuid> {
    caller
        .user_id
        .ok_or_else(|| AppError::forbidden("User has no local account"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::share::testing::{InMemoryFirms, InMemoryMatters, InMemoryShares};
    use lexvault_core::ErrorKind;
    use lexvault_entity::matter::Matter;
    use std::collections::HashMap;

    fn caller(firm_id: Uuid) -> UserInfo {
        UserInfo {
            subject: "auth0|t".to_string(),
            user_id: Some(Uuid::new_v4()),
            email: "t@firm.test".to_string(),
            display_name: "T".to_string(),
            roles: vec!["legal_manager".to_string()],
            firm_id: Some(firm_id),
            attributes: HashMap::new(),
            clearance_level: None,
        }
    }

    fn matter(firm_id: Uuid) -> Matter {
        Matter {
            id: Uuid::new_v4(),
            firm_id,
            title: "Estate of Doe".to_string(),
            matter_number: None,
            created_at: Utc::now(),
        }
    }

    fn share(
        matter_id: Uuid,
        owner_firm: Uuid,
        recipient_firm: Uuid,
        status: ShareStatus,
        expires_at: Option<DateTime<Utc>>,
    ) -> MatterShare {
        let now = Utc::now();
        MatterShare {
            id: Uuid::new_v4(),
            matter_id,
            owner_firm_id: owner_firm,
            owner_user_id: Uuid::new_v4(),
            recipient_firm_id: recipient_firm,
            role: CollaborationRole::Viewer,
            status,
            permissions: CollaborationRole::Viewer.default_permissions(),
            restrictions: serde_json::json!({}),
            expires_at,
            accepted_at: None,
            accepted_by_user_id: None,
            invitation_message: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn input(matter_id: Uuid, recipient_firm_id: Uuid, role: CollaborationRole) -> CreateShareInput {
        CreateShareInput {
            matter_id,
            recipient_firm_id,
            role,
            permissions: SharePermissionOverrides::default(),
            restrictions: None,
            expires_at: None,
            invitation_message: None,
        }
    }

    fn service(
        shares: Arc<InMemoryShares>,
        matters: Vec<Matter>,
        firms: Vec<Uuid>,
    ) -> MatterShareService {
        MatterShareService::new(
            shares,
            Arc::new(InMemoryMatters::with(matters)),
            Arc::new(InMemoryFirms::with(firms)),
        )
    }

    #[tokio::test]
    async fn test_duplicate_pair_is_a_conflict_and_leaves_the_first_share_alone() {
        let owner_firm = Uuid::new_v4();
        let recipient_firm = Uuid::new_v4();
        let m = matter(owner_firm);
        let shares = Arc::new(InMemoryShares::default());
        let svc = service(Arc::clone(&shares), vec![m.clone()], vec![recipient_firm]);
        let user = caller(owner_firm);

        let first = svc
            .create_share(&user, input(m.id, recipient_firm, CollaborationRole::Viewer))
            .await
            .unwrap();

        let err = svc
            .create_share(&user, input(m.id, recipient_firm, CollaborationRole::Editor))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let stored = shares.get(first.id).unwrap();
        assert_eq!(stored.role, CollaborationRole::Viewer);
        assert_eq!(stored.updated_at, first.updated_at);
        assert_eq!(shares.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_expiry_sweep_is_idempotent_and_only_touches_accepted() {
        let owner_firm = Uuid::new_v4();
        let recipient_firm = Uuid::new_v4();
        let matter_id = Uuid::new_v4();
        let past = Utc::now() - chrono::Duration::hours(1);
        let future = Utc::now() + chrono::Duration::hours(1);

        let lapsed = share(
            matter_id,
            owner_firm,
            recipient_firm,
            ShareStatus::Accepted,
            Some(past),
        );
        let current = share(
            matter_id,
            owner_firm,
            Uuid::new_v4(),
            ShareStatus::Accepted,
            Some(future),
        );
        let pending = share(
            matter_id,
            owner_firm,
            Uuid::new_v4(),
            ShareStatus::Pending,
            Some(past),
        );
        let revoked = share(
            matter_id,
            owner_firm,
            Uuid::new_v4(),
            ShareStatus::Revoked,
            Some(past),
        );
        let shares = Arc::new(InMemoryShares::with(vec![
            lapsed.clone(),
            current.clone(),
            pending.clone(),
            revoked.clone(),
        ]));
        let svc = service(Arc::clone(&shares), vec![], vec![]);

        assert_eq!(svc.expire_old_shares().await.unwrap(), 1);
        assert_eq!(svc.expire_old_shares().await.unwrap(), 0);

        assert_eq!(shares.get(lapsed.id).unwrap().status, ShareStatus::Expired);
        assert_eq!(shares.get(current.id).unwrap().status, ShareStatus::Accepted);
        assert_eq!(shares.get(pending.id).unwrap().status, ShareStatus::Pending);
        assert_eq!(shares.get(revoked.id).unwrap().status, ShareStatus::Revoked);
    }
}
