//! Per-request authentication gate.
//!
//! Resolves a session or bearer credential into a verified [`UserInfo`]
//! principal, refreshing lapsed access credentials in place when a
//! refresh credential exists.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use lexvault_core::config::oidc::OidcConfig;
use lexvault_core::config::session::SessionConfig;
use lexvault_core::error::AppError;
use lexvault_database::repositories::UserRepository;
use lexvault_entity::principal::UserInfo;
use lexvault_entity::session::AuthSession;

use crate::oidc::{OidcClient, TokenResponse};
use crate::session::SessionStore;
use crate::token::{IdClaims, TokenValidator};

/// Credentials presented by an inbound request.
#[derive(Debug, Clone, Default)]
pub struct RequestCredentials {
    /// Session ID from the session cookie, when present.
    pub session_id: Option<Uuid>,
    /// Bearer token from the Authorization header, when present.
    pub bearer: Option<String>,
}

/// Authenticates requests and manages session refresh.
pub struct AuthenticationGate {
    validator: Arc<TokenValidator>,
    oidc: Arc<OidcClient>,
    sessions: Arc<dyn SessionStore>,
    users: Arc<UserRepository>,
    /// Per-session locks coalescing concurrent refresh attempts.
    refresh_locks: DashMap<Uuid, Arc<Mutex<()>>>,
    /// Test-harness bypass credential; `None` in production deployments.
    bypass_token: Option<String>,
    absolute_timeout_hours: u64,
}

impl std::fmt::Debug for AuthenticationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationGate")
            .field("bypass_enabled", &self.bypass_token.is_some())
            .finish()
    }
}

impl AuthenticationGate {
    /// Creates a new authentication gate.
    ///
    /// `is_production` disables the bypass credential regardless of
    /// configuration.
    pub fn new(
        validator: Arc<TokenValidator>,
        oidc: Arc<OidcClient>,
        sessions: Arc<dyn SessionStore>,
        users: Arc<UserRepository>,
        oidc_config: &OidcConfig,
        session_config: &SessionConfig,
        is_production: bool,
    ) -> Self {
        let bypass_token = if is_production {
            None
        } else {
            oidc_config.dev_bypass_token.clone()
        };
        if bypass_token.is_some() {
            warn!("Authentication bypass credential is enabled (non-production mode)");
        }

        Self {
            validator,
            oidc,
            sessions,
            users,
            refresh_locks: DashMap::new(),
            bypass_token,
            absolute_timeout_hours: session_config.absolute_timeout_hours,
        }
    }

    /// Authenticates a request, producing the verified principal.
    pub async fn authenticate(&self, creds: &RequestCredentials) -> Result<UserInfo, AppError> {
        if let (Some(bypass), Some(bearer)) = (&self.bypass_token, &creds.bearer) {
            if bearer == bypass {
                return Ok(bypass_principal());
            }
        }

        if let Some(session_id) = creds.session_id {
            if let Some(session) = self.sessions.get(session_id).await? {
                return self.authenticate_session(session).await;
            }
        }

        if let Some(bearer) = &creds.bearer {
            // Header-borne credential: validated directly, no refresh path.
            let claims = self.validator.validate(bearer).await?;
            return self.resolve_principal(claims).await;
        }

        Err(AppError::unauthenticated("No credentials presented"))
    }

    /// Creates a server-side session from a fresh token response
    /// (login / code-exchange path).
    pub async fn establish_session(
        &self,
        tokens: TokenResponse,
    ) -> Result<AuthSession, AppError> {
        let claims = self.validator.validate(&tokens.access_token).await?;
        let principal = self.resolve_principal(claims).await?;
        let now = Utc::now();

        let session = AuthSession {
            id: Uuid::new_v4(),
            principal,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            access_expires_at: now + Duration::seconds(tokens.expires_in),
            issued_at: now,
            expires_at: now + Duration::hours(self.absolute_timeout_hours as i64),
        };

        self.sessions.set(&session).await?;
        info!(session_id = %session.id, subject = %session.principal.subject, "Session established");
        Ok(session)
    }

    /// Refreshes a session on demand (explicit refresh endpoint).
    ///
    /// A session whose access credential is still valid is returned
    /// unchanged.
    pub async fn refresh(&self, session_id: Uuid) -> Result<AuthSession, AppError> {
        self.refresh_session(session_id).await
    }

    /// Destroys a session (logout).
    pub async fn destroy_session(&self, session_id: Uuid) -> Result<(), AppError> {
        self.sessions.destroy(session_id).await?;
        info!(session_id = %session_id, "Session destroyed");
        Ok(())
    }

    async fn authenticate_session(&self, session: AuthSession) -> Result<UserInfo, AppError> {
        let now = Utc::now();

        if session.session_expired(now) {
            let _ = self.sessions.destroy(session.id).await;
            return Err(AppError::unauthenticated("Session expired"));
        }

        if !session.access_expired(now) {
            let claims = self.validator.validate(&session.access_token).await?;
            return self.resolve_principal(claims).await;
        }

        if session.refresh_token.is_none() {
            let _ = self.sessions.destroy(session.id).await;
            return Err(AppError::unauthenticated("Session expired"));
        }

        let refreshed = self.refresh_session(session.id).await?;
        Ok(refreshed.principal)
    }

    /// Refreshes a session's tokens, coalescing concurrent attempts on
    /// the same session ID. The loser of the race re-reads the session
    /// after acquiring the lock and reuses the winner's tokens.
    async fn refresh_session(&self, session_id: Uuid) -> Result<AuthSession, AppError> {
        let lock = self
            .refresh_locks
            .entry(session_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        let result = self.refresh_session_locked(session_id).await;

        drop(_guard);
        // Stale entries are recreated on demand.
        self.refresh_locks.remove(&session_id);

        result
    }

    async fn refresh_session_locked(&self, session_id: Uuid) -> Result<AuthSession, AppError> {
        let now = Utc::now();

        let current = self
            .sessions
            .get(session_id)
            .await?
            .ok_or_else(|| AppError::unauthenticated("Session not found"))?;

        if !current.access_expired(now) {
            // A concurrent request already refreshed this session.
            return Ok(current);
        }

        let refresh_token = current
            .refresh_token
            .clone()
            .ok_or_else(|| AppError::unauthenticated("Session expired"))?;

        let tokens = match self.oidc.refresh(&refresh_token).await {
            Ok(tokens) => tokens,
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "Token refresh failed");
                let _ = self.sessions.destroy(session_id).await;
                return Err(AppError::unauthenticated(
                    "Session expired and refresh failed",
                ));
            }
        };

        let claims = self.validator.validate(&tokens.access_token).await?;
        let principal = self.resolve_principal(claims).await?;

        let updated = AuthSession {
            id: current.id,
            principal,
            access_token: tokens.access_token,
            // Providers that do not rotate refresh tokens return none.
            refresh_token: tokens.refresh_token.or(Some(refresh_token)),
            access_expires_at: now + Duration::seconds(tokens.expires_in),
            issued_at: current.issued_at,
            expires_at: current.expires_at,
        };

        self.sessions.set(&updated).await?;
        info!(session_id = %session_id, "Session refreshed");
        Ok(updated)
    }

    /// Resolves validated claims into a principal, merging the persisted
    /// profile when one exists. The profile's firm ID, roles, and
    /// clearance supersede the token's claims.
    async fn resolve_principal(&self, claims: IdClaims) -> Result<UserInfo, AppError> {
        let profile = self.users.find_by_subject(&claims.sub).await?;

        let principal = match profile {
            Some(user) => UserInfo {
                subject: claims.sub,
                user_id: Some(user.id),
                email: user.email,
                display_name: user.display_name,
                roles: user.roles,
                firm_id: user.firm_id,
                // Attribute claims (e.g. accessible client IDs) ride
                // along even when a local profile wins the rest.
                attributes: claims.attributes,
                clearance_level: user.clearance_level,
            },
            None => UserInfo {
                subject: claims.sub,
                user_id: None,
                email: claims.email.unwrap_or_default(),
                display_name: claims.name.unwrap_or_default(),
                roles: claims.roles,
                firm_id: claims.firm_id,
                attributes: claims.attributes,
                clearance_level: claims.clearance_level,
            },
        };

        Ok(principal)
    }
}

/// Fixed principal produced by the non-production bypass credential.
fn bypass_principal() -> UserInfo {
    UserInfo {
        subject: "lexvault|test-harness".to_string(),
        user_id: None,
        email: "harness@lexvault.invalid".to_string(),
        display_name: "Test Harness".to_string(),
        roles: vec!["super_admin".to_string()],
        firm_id: None,
        attributes: HashMap::new(),
        clearance_level: None,
    }
}
