//! # lexvault-policy
//!
//! The policy decision layer: query/verdict types, the external policy
//! decision point (PDP) client, the deterministic in-process fallback
//! engine, the static route-policy table, and the authorization gate
//! that ties them together.

pub mod decision;
pub mod fallback;
pub mod gate;
pub mod pdp;
pub mod routes;

pub use decision::{Decision, Obligations, PolicyQuery, PolicyResource, RequestMeta};
pub use fallback::FallbackEngine;
pub use gate::{AuthorizationGate, AuthorizationRequest};
pub use pdp::PdpClient;
pub use routes::{RequiredPermission, RoutePolicy, RoutePolicyTable};
