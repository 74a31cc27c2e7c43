//! Domain entities for the LexVault platform.
//!
//! Models are plain data plus the pure rules that govern them (share
//! status transitions, default permission sets, confidentiality
//! labelling). Persistence lives in `lexvault-database`.

pub mod document;
pub mod firm;
pub mod matter;
pub mod matter_share;
pub mod principal;
pub mod session;
pub mod user;

pub use document::{ConfidentialityLabel, Document};
pub use firm::Firm;
pub use matter::Matter;
pub use matter_share::{
    CollaborationRole, CreateMatterShare, MatterShare, SharePermissionOverrides, SharePermissions,
    ShareStatus, UpdateMatterShare,
};
pub use principal::UserInfo;
pub use session::AuthSession;
pub use user::User;
