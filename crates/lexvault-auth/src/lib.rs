//! # lexvault-auth
//!
//! Request authentication: identity token validation against the
//! provider's published keys, the OIDC token-exchange/refresh client,
//! the session store, and the per-request authentication gate.

pub mod gate;
pub mod oidc;
pub mod session;
pub mod token;

pub use gate::{AuthenticationGate, RequestCredentials};
pub use oidc::{OidcClient, TokenResponse};
pub use session::{PgSessionStore, SessionStore};
pub use token::{IdClaims, JwksClient, TokenValidator};
