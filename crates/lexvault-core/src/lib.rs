//! Core types shared across all LexVault crates.
//!
//! Contains the unified error type, the `AppResult` alias, and the
//! configuration schemas.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
