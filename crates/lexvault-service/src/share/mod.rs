//! Cross-firm matter sharing.

pub mod access;
pub mod service;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;
