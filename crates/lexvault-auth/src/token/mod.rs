//! Identity token validation.

pub mod claims;
pub mod jwks;
pub mod validator;

pub use claims::IdClaims;
pub use jwks::JwksClient;
pub use validator::TokenValidator;
