//! In-memory store implementations for service tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use lexvault_core::AppResult;
use lexvault_entity::document::Document;
use lexvault_entity::matter::Matter;
use lexvault_entity::matter_share::{CreateMatterShare, MatterShare, ShareStatus};

use super::store::{DocumentStore, FirmDirectory, MatterDirectory, ShareStore};

/// Mutex-backed share map mirroring the repository's query semantics.
#[derive(Default)]
pub(crate) struct InMemoryShares {
    shares: Mutex<HashMap<Uuid, MatterShare>>,
}

impl InMemoryShares {
    pub(crate) fn with(shares: Vec<MatterShare>) -> Self {
        Self {
            shares: Mutex::new(shares.into_iter().map(|s| (s.id, s)).collect()),
        }
    }

    pub(crate) fn get(&self, id: Uuid) -> Option<MatterShare> {
        self.shares.lock().unwrap().get(&id).cloned()
    }

    pub(crate) fn snapshot(&self) -> Vec<MatterShare> {
        self.shares.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl ShareStore for InMemoryShares {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MatterShare>> {
        Ok(self.get(id))
    }

    async fn find_by_matter_and_firm(
        &self,
        matter_id: Uuid,
        recipient_firm_id: Uuid,
    ) -> AppResult<Option<MatterShare>> {
        Ok(self
            .snapshot()
            .into_iter()
            .find(|s| s.matter_id == matter_id && s.recipient_firm_id == recipient_firm_id))
    }

    async fn find_by_matter(&self, matter_id: Uuid) -> AppResult<Vec<MatterShare>> {
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|s| s.matter_id == matter_id)
            .collect())
    }

    async fn find_by_recipient_firm(
        &self,
        firm_id: Uuid,
        status: Option<ShareStatus>,
    ) -> AppResult<Vec<MatterShare>> {
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|s| s.recipient_firm_id == firm_id)
            .filter(|s| status.is_none_or(|wanted| s.status == wanted))
            .collect())
    }

    async fn create(&self, data: &CreateMatterShare) -> AppResult<MatterShare> {
        let now = Utc::now();
        let share = MatterShare {
            id: Uuid::new_v4(),
            matter_id: data.matter_id,
            owner_firm_id: data.owner_firm_id,
            owner_user_id: data.owner_user_id,
            recipient_firm_id: data.recipient_firm_id,
            role: data.role,
            status: ShareStatus::Pending,
            permissions: data.permissions,
            restrictions: data.restrictions.clone(),
            expires_at: data.expires_at,
            accepted_at: None,
            accepted_by_user_id: None,
            invitation_message: data.invitation_message.clone(),
            created_at: now,
            updated_at: now,
        };
        self.shares.lock().unwrap().insert(share.id, share.clone());
        Ok(share)
    }

    async fn update(&self, share: &MatterShare) -> AppResult<()> {
        self.shares.lock().unwrap().insert(share.id, share.clone());
        Ok(())
    }

    async fn delete(&self, share_id: Uuid) -> AppResult<bool> {
        Ok(self.shares.lock().unwrap().remove(&share_id).is_some())
    }

    async fn expire_accepted_past_due(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut shares = self.shares.lock().unwrap();
        let mut count = 0;
        for share in shares.values_mut() {
            if share.status == ShareStatus::Accepted
                && share.expires_at.is_some_and(|e| e < now)
            {
                share.status = ShareStatus::Expired;
                share.updated_at = now;
                count += 1;
            }
        }
        Ok(count)
    }
}

#[derive(Default)]
pub(crate) struct InMemoryMatters {
    matters: Mutex<HashMap<Uuid, Matter>>,
}

impl InMemoryMatters {
    pub(crate) fn with(matters: Vec<Matter>) -> Self {
        Self {
            matters: Mutex::new(matters.into_iter().map(|m| (m.id, m)).collect()),
        }
    }
}

#[async_trait]
impl MatterDirectory for InMemoryMatters {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Matter>> {
        Ok(self.matters.lock().unwrap().get(&id).cloned())
    }
}

pub(crate) struct InMemoryFirms {
    firm_ids: Vec<Uuid>,
}

impl InMemoryFirms {
    pub(crate) fn with(firm_ids: Vec<Uuid>) -> Self {
        Self { firm_ids }
    }
}

#[async_trait]
impl FirmDirectory for InMemoryFirms {
    async fn exists(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.firm_ids.contains(&id))
    }
}

#[derive(Default)]
pub(crate) struct InMemoryDocuments {
    documents: Mutex<HashMap<Uuid, Document>>,
}

#[async_trait]
impl DocumentStore for InMemoryDocuments {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>> {
        Ok(self.documents.lock().unwrap().get(&id).cloned())
    }
}
