//! Matter share CRUD and lifecycle handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use lexvault_entity::matter_share::{ShareStatus, UpdateMatterShare};
use lexvault_service::CreateShareInput;

use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// POST /api/shares
pub async fn create_share(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<CreateShareInput>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let share = state.share_service.create_share(&user, input).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": share })))
}

/// GET /api/shares/{id}
pub async fn get_share(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let share = state.share_service.get_share(&user, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": share })))
}

/// PATCH /api/shares/{id}
pub async fn update_share(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateMatterShare>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let share = state.share_service.update_share(&user, id, patch).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": share })))
}

/// DELETE /api/shares/{id}
pub async fn delete_share(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.share_service.delete_share(&user, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": null })))
}

/// POST /api/shares/{id}/accept
pub async fn accept_share(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let share = state.share_service.accept_share(&user, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": share })))
}

/// POST /api/shares/{id}/decline
pub async fn decline_share(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let share = state.share_service.decline_share(&user, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": share })))
}

/// GET /api/matters/{id}/shares
pub async fn list_matter_shares(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(matter_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let shares = state.share_service.list_by_matter(&user, matter_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": shares })))
}

/// Filters for the incoming share listing.
#[derive(Debug, Deserialize)]
pub struct IncomingParams {
    /// Restrict to one lifecycle status.
    pub status: Option<ShareStatus>,
}

/// GET /api/shares/incoming
pub async fn list_incoming_shares(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<IncomingParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let shares = state.share_service.list_incoming(&user, params.status).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": shares })))
}
