//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use lexvault_auth::{AuthenticationGate, OidcClient};
use lexvault_core::config::AppConfig;
use lexvault_policy::{AuthorizationGate, RoutePolicyTable};
use lexvault_service::{MatterShareService, SharedDocumentMediator};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// Per-request authentication gate
    pub auth_gate: Arc<AuthenticationGate>,
    /// Per-route authorization gate
    pub authz_gate: Arc<AuthorizationGate>,
    /// Route-to-permission table
    pub route_policies: Arc<RoutePolicyTable>,
    /// OIDC token endpoint client
    pub oidc: Arc<OidcClient>,
    /// Matter share lifecycle service
    pub share_service: Arc<MatterShareService>,
    /// Shared-document access mediator
    pub document_mediator: Arc<SharedDocumentMediator>,
}
