//! Session storage.

pub mod store;

pub use store::{PgSessionStore, SessionStore};
