//! Concrete repository implementations.

pub mod document;
pub mod firm;
pub mod matter;
pub mod matter_share;
pub mod session;
pub mod user;

pub use document::DocumentRepository;
pub use firm::FirmRepository;
pub use matter::MatterRepository;
pub use matter_share::MatterShareRepository;
pub use session::SessionRepository;
pub use user::UserRepository;
