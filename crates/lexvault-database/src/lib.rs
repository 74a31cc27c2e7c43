//! # lexvault-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for all LexVault entities.

pub mod connection;
pub mod repositories;

pub use connection::DatabasePool;
