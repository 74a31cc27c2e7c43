//! Session store interface and the Postgres-backed implementation.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use lexvault_core::AppResult;
use lexvault_database::repositories::SessionRepository;
use lexvault_entity::session::AuthSession;

/// Abstract session persistence, keyed by session ID.
///
/// The authentication gate only ever talks to this interface, so tests
/// and alternative backends can swap the storage without touching the
/// refresh logic.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load a session by ID.
    async fn get(&self, id: Uuid) -> AppResult<Option<AuthSession>>;

    /// Insert or replace a session.
    async fn set(&self, session: &AuthSession) -> AppResult<()>;

    /// Destroy a session. Returns whether a record existed.
    async fn destroy(&self, id: Uuid) -> AppResult<bool>;
}

/// Postgres-backed session store.
#[derive(Debug, Clone)]
pub struct PgSessionStore {
    repo: Arc<SessionRepository>,
}

impl PgSessionStore {
    /// Creates a new store over the session repository.
    pub fn new(repo: Arc<SessionRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn get(&self, id: Uuid) -> AppResult<Option<AuthSession>> {
        self.repo.find_by_id(id).await
    }

    async fn set(&self, session: &AuthSession) -> AppResult<()> {
        self.repo.upsert(session).await
    }

    async fn destroy(&self, id: Uuid) -> AppResult<bool> {
        self.repo.delete(id).await
    }
}
