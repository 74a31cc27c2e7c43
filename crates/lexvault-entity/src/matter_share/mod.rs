//! Cross-firm matter sharing: model, roles, status state machine, and
//! permission sets.

pub mod model;
pub mod permissions;
pub mod role;
pub mod status;

pub use model::{CreateMatterShare, MatterShare, UpdateMatterShare};
pub use permissions::{SharePermissionOverrides, SharePermissions};
pub use role::CollaborationRole;
pub use status::ShareStatus;
