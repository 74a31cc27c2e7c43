//! Application builder: wires repositories, gates, services, worker,
//! and router into a running server.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use lexvault_auth::{
    AuthenticationGate, JwksClient, OidcClient, PgSessionStore, SessionStore, TokenValidator,
};
use lexvault_core::config::AppConfig;
use lexvault_core::error::AppError;
use lexvault_database::repositories::{
    DocumentRepository, FirmRepository, MatterRepository, MatterShareRepository,
    SessionRepository, UserRepository,
};
use lexvault_policy::{AuthorizationGate, PdpClient, RoutePolicyTable};
use lexvault_service::{MatterShareService, ShareStore, SharedDocumentMediator};
use lexvault_worker::CronScheduler;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application from a prepared state.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the LexVault server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    tracing::info!("Starting LexVault server...");

    // Repositories
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let session_repo = Arc::new(SessionRepository::new(db_pool.clone()));
    let matter_repo = Arc::new(MatterRepository::new(db_pool.clone()));
    let firm_repo = Arc::new(FirmRepository::new(db_pool.clone()));
    let document_repo = Arc::new(DocumentRepository::new(db_pool.clone()));
    let share_repo: Arc<dyn ShareStore> =
        Arc::new(MatterShareRepository::new(db_pool.clone()));

    // Authentication
    let jwks = Arc::new(JwksClient::new(&config.oidc)?);
    let validator = Arc::new(TokenValidator::new(&config.oidc, jwks));
    let oidc = Arc::new(OidcClient::new(&config.oidc)?);
    let session_store: Arc<dyn SessionStore> =
        Arc::new(PgSessionStore::new(Arc::clone(&session_repo)));
    let auth_gate = Arc::new(AuthenticationGate::new(
        validator,
        Arc::clone(&oidc),
        session_store,
        Arc::clone(&user_repo),
        &config.oidc,
        &config.session,
        config.server.is_production(),
    ));

    // Authorization
    let pdp = PdpClient::new(&config.policy)?;
    let authz_gate = Arc::new(AuthorizationGate::new(pdp));
    let route_policies = Arc::new(RoutePolicyTable::new());

    // Services
    let share_service = Arc::new(MatterShareService::new(
        Arc::clone(&share_repo),
        matter_repo,
        firm_repo,
    ));
    let document_mediator = Arc::new(SharedDocumentMediator::new(
        Arc::clone(&share_repo),
        document_repo,
    ));

    // Background worker
    let scheduler = if config.worker.enabled {
        let scheduler =
            CronScheduler::new(config.worker.clone(), Arc::clone(&share_service)).await?;
        scheduler.register_default_tasks().await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Background worker disabled");
        None
    };

    let state = AppState {
        config: Arc::new(config.clone()),
        db_pool,
        auth_gate,
        authz_gate,
        route_policies,
        oidc,
        share_service,
        document_mediator,
    };

    let app = build_app(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("LexVault server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    if let Some(mut scheduler) = scheduler {
        scheduler.shutdown().await?;
    }

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
}
