//! Cross-firm document access handler.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// GET /api/shares/{id}/documents/{document_id}
///
/// Runs the shared-document mediator and returns the cleared document
/// metadata plus the watermark instruction. Byte delivery is handled by
/// the document storage tier; this endpoint is its gatekeeper.
pub async fn get_shared_document(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((share_id, document_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let access = state
        .document_mediator
        .authorize_and_prepare(&user, share_id, document_id)
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "document": access.document,
            "permissions": access.permissions,
            "is_external_access": access.is_external_access,
            "watermark": access.watermark,
            "watermark_label": access.confidentiality_label.as_str(),
        },
    })))
}
