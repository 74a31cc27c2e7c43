//! Persistence interfaces for the sharing services, plus the
//! Postgres-backed implementations over the concrete repositories.
//!
//! The services only ever talk to these interfaces, so tests and
//! alternative backends can swap the storage without touching the
//! lifecycle or mediation logic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use lexvault_core::AppResult;
use lexvault_database::repositories::{
    DocumentRepository, FirmRepository, MatterRepository, MatterShareRepository,
};
use lexvault_entity::document::Document;
use lexvault_entity::matter::Matter;
use lexvault_entity::matter_share::{CreateMatterShare, MatterShare, ShareStatus};

/// Abstract matter share persistence.
#[async_trait]
pub trait ShareStore: Send + Sync {
    /// Load a share by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MatterShare>>;

    /// Load the share for a (matter, recipient firm) pair, if any.
    async fn find_by_matter_and_firm(
        &self,
        matter_id: Uuid,
        recipient_firm_id: Uuid,
    ) -> AppResult<Option<MatterShare>>;

    /// List all shares of a matter.
    async fn find_by_matter(&self, matter_id: Uuid) -> AppResult<Vec<MatterShare>>;

    /// List shares received by a firm, optionally filtered by status.
    async fn find_by_recipient_firm(
        &self,
        firm_id: Uuid,
        status: Option<ShareStatus>,
    ) -> AppResult<Vec<MatterShare>>;

    /// Persist a new share in `pending` status.
    async fn create(&self, data: &CreateMatterShare) -> AppResult<MatterShare>;

    /// Persist the full mutable state of a share.
    async fn update(&self, share: &MatterShare) -> AppResult<()>;

    /// Hard-delete a share. Returns whether a record existed.
    async fn delete(&self, share_id: Uuid) -> AppResult<bool>;

    /// Flip accepted shares past their expiry to `expired`; returns the
    /// number of rows mutated.
    async fn expire_accepted_past_due(&self, now: DateTime<Utc>) -> AppResult<u64>;
}

/// Matter lookups needed for ownership checks.
#[async_trait]
pub trait MatterDirectory: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Matter>>;
}

/// Firm existence checks for invitation targets.
#[async_trait]
pub trait FirmDirectory: Send + Sync {
    async fn exists(&self, id: Uuid) -> AppResult<bool>;
}

/// Document metadata lookups for the access mediator.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>>;
}

#[async_trait]
impl ShareStore for MatterShareRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MatterShare>> {
        MatterShareRepository::find_by_id(self, id).await
    }

    async fn find_by_matter_and_firm(
        &self,
        matter_id: Uuid,
        recipient_firm_id: Uuid,
    ) -> AppResult<Option<MatterShare>> {
        MatterShareRepository::find_by_matter_and_firm(self, matter_id, recipient_firm_id).await
    }

    async fn find_by_matter(&self, matter_id: Uuid) -> AppResult<Vec<MatterShare>> {
        MatterShareRepository::find_by_matter(self, matter_id).await
    }

    async fn find_by_recipient_firm(
        &self,
        firm_id: Uuid,
        status: Option<ShareStatus>,
    ) -> AppResult<Vec<MatterShare>> {
        MatterShareRepository::find_by_recipient_firm(self, firm_id, status).await
    }

    async fn create(&self, data: &CreateMatterShare) -> AppResult<MatterShare> {
        MatterShareRepository::create(self, data).await
    }

    async fn update(&self, share: &MatterShare) -> AppResult<()> {
        MatterShareRepository::update(self, share).await
    }

    async fn delete(&self, share_id: Uuid) -> AppResult<bool> {
        MatterShareRepository::delete(self, share_id).await
    }

    async fn expire_accepted_past_due(&self, now: DateTime<Utc>) -> AppResult<u64> {
        MatterShareRepository::expire_accepted_past_due(self, now).await
    }
}

#[async_trait]
impl MatterDirectory for MatterRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Matter>> {
        MatterRepository::find_by_id(self, id).await
    }
}

#[async_trait]
impl FirmDirectory for FirmRepository {
    async fn exists(&self, id: Uuid) -> AppResult<bool> {
        FirmRepository::exists(self, id).await
    }
}

#[async_trait]
impl DocumentStore for DocumentRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>> {
        DocumentRepository::find_by_id(self, id).await
    }
}
