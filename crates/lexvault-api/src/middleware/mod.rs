//! HTTP middleware.

pub mod authz;
pub mod cors;

pub use authz::{RequestObligations, authorize};
pub use cors::build_cors_layer;
