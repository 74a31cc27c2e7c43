//! Login callback, logout, and current-principal handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, header::SET_COOKIE};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use uuid::Uuid;

use lexvault_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::{CurrentUser, session_id_from_headers};
use crate::state::AppState;

/// Query parameters of the identity provider redirect.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    /// Authorization code to exchange.
    pub code: String,
    /// Redirect URI used in the authorization request.
    pub redirect_uri: String,
}

/// GET /api/auth/callback
///
/// Exchanges the authorization code, establishes a server-side session,
/// and hands the browser its session cookie.
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<Response, ApiError> {
    let tokens = state
        .oidc
        .exchange_code(&params.code, &params.redirect_uri)
        .await?;
    let session = state.auth_gate.establish_session(tokens).await?;

    let mut response = Json(serde_json::json!({
        "success": true,
        "data": session.principal,
    }))
    .into_response();
    response
        .headers_mut()
        .insert(SET_COOKIE, session_cookie(&state, Some(session.id))?);
    Ok(response)
}

/// POST /api/auth/refresh
///
/// Forces a token refresh on the caller's session. A session whose
/// access credential is still valid comes back unchanged.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    _user: CurrentUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let session_id = session_id_from_headers(&headers, &state.config.session.cookie_name)
        .ok_or_else(|| ApiError(AppError::unauthenticated("No session cookie presented")))?;
    let session = state.auth_gate.refresh(session_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "data": session.principal,
    })))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    _user: CurrentUser,
) -> Result<Response, ApiError> {
    if let Some(session_id) =
        session_id_from_headers(&headers, &state.config.session.cookie_name)
    {
        state.auth_gate.destroy_session(session_id).await?;
    }

    let mut response =
        Json(serde_json::json!({ "success": true, "data": null })).into_response();
    response
        .headers_mut()
        .insert(SET_COOKIE, session_cookie(&state, None)?);
    Ok(response)
}

/// GET /api/auth/me
pub async fn me(user: CurrentUser) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "success": true, "data": user.0 }))
}

/// Builds the session cookie; `None` produces the clearing form.
fn session_cookie(state: &AppState, session_id: Option<Uuid>) -> Result<HeaderValue, ApiError> {
    let name = &state.config.session.cookie_name;
    let cookie = match session_id {
        Some(id) => {
            let secure = if state.config.server.is_production() {
                "; Secure"
            } else {
                ""
            };
            format!("{name}={id}; Path=/; HttpOnly; SameSite=Lax{secure}")
        }
        None => format!("{name}=; Path=/; HttpOnly; Max-Age=0"),
    };

    HeaderValue::from_str(&cookie)
        .map_err(|e| ApiError(AppError::internal(format!("Invalid cookie value: {e}"))))
}
