//! # lexvault-api
//!
//! HTTP API layer built on Axum: routes, the authentication extractor,
//! the authorization middleware, error mapping, and server wiring.

pub mod app;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
