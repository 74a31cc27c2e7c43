//! Request extractors.

pub mod auth;

pub use auth::{CurrentUser, session_id_from_headers};
