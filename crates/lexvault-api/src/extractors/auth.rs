//! `CurrentUser` extractor: resolves the session cookie or bearer
//! credential into a verified principal via the authentication gate.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use uuid::Uuid;

use lexvault_auth::RequestCredentials;
use lexvault_entity::principal::UserInfo;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated principal available in handlers.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserInfo);

impl std::ops::Deref for CurrentUser {
    type Target = UserInfo;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // The authorization middleware authenticates first and stashes
        // the principal; reuse it rather than validating twice.
        if let Some(user) = parts.extensions.get::<UserInfo>() {
            return Ok(CurrentUser(user.clone()));
        }

        let creds = credentials_from_headers(&parts.headers, &state.config.session.cookie_name);
        let user = state.auth_gate.authenticate(&creds).await?;
        Ok(CurrentUser(user))
    }
}

/// Pulls the session cookie and bearer token out of request headers.
pub fn credentials_from_headers(headers: &HeaderMap, cookie_name: &str) -> RequestCredentials {
    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(String::from);

    RequestCredentials {
        session_id: session_id_from_headers(headers, cookie_name),
        bearer,
    }
}

/// Parses the session ID cookie, when present and well-formed.
pub fn session_id_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<Uuid> {
    let cookies = headers.get("cookie")?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == cookie_name {
            Uuid::parse_str(value.trim()).ok()
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_cookie_parsing() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            "cookie",
            HeaderValue::from_str(&format!("theme=dark; lexvault_session={id}; lang=en"))
                .unwrap(),
        );
        assert_eq!(
            session_id_from_headers(&headers, "lexvault_session"),
            Some(id)
        );
        assert_eq!(session_id_from_headers(&headers, "other_session"), None);
    }

    #[test]
    fn test_malformed_cookie_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "cookie",
            HeaderValue::from_static("lexvault_session=not-a-uuid"),
        );
        assert_eq!(session_id_from_headers(&headers, "lexvault_session"), None);
    }

    #[test]
    fn test_bearer_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def"));
        let creds = credentials_from_headers(&headers, "lexvault_session");
        assert_eq!(creds.bearer.as_deref(), Some("abc.def"));
        assert!(creds.session_id.is_none());
    }
}
