//! Route definitions for the LexVault HTTP API.
//!
//! API routes mount under `/api` and carry the authorization middleware
//! as a route layer so the matched route pattern is available for the
//! policy table lookup. The health probe sits outside `/api` and skips
//! the middleware entirely.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(share_routes())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::authz::authorize,
        ));

    let cors = middleware::build_cors_layer(&state.config.server.cors);

    Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: OIDC callback, refresh, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/callback", get(handlers::auth::callback))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Matter share lifecycle and shared document release
fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/shares", post(handlers::share::create_share))
        .route("/shares/incoming", get(handlers::share::list_incoming_shares))
        .route("/shares/{id}", get(handlers::share::get_share))
        .route("/shares/{id}", patch(handlers::share::update_share))
        .route("/shares/{id}", delete(handlers::share::delete_share))
        .route("/shares/{id}/accept", post(handlers::share::accept_share))
        .route("/shares/{id}/decline", post(handlers::share::decline_share))
        .route(
            "/shares/{id}/documents/{document_id}",
            get(handlers::shared_document::get_shared_document),
        )
        .route(
            "/matters/{id}/shares",
            get(handlers::share::list_matter_shares),
        )
}
