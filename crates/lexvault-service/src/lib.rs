//! # lexvault-service
//!
//! Business logic: the matter share lifecycle service and the
//! shared-document access mediator.

pub mod share;

pub use share::access::{SharedDocumentAccess, SharedDocumentMediator};
pub use share::service::{CreateShareInput, MatterShareService};
pub use share::store::{DocumentStore, FirmDirectory, MatterDirectory, ShareStore};
