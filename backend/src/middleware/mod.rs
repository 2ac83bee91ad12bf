//! HTTP middleware chain.
//!
//! Mounted outermost to innermost: [`AccessLog`], [`Recovery`], [`Cors`],
//! [`RequestIdTagger`]. The [`gate`] module hosts the stub extension points
//! ([`guards`]), which are defined but not mounted by default.

pub mod access_log;
pub mod cors;
pub mod gate;
pub mod guards;
pub mod recovery;
pub mod request_id;

pub use access_log::AccessLog;
pub use cors::Cors;
pub use gate::{Gate, GatePolicy};
pub use guards::{AcceptAll, BearerAuth, RateLimit, RoleCheck, Timeout, TokenVerifier};
pub use recovery::Recovery;
pub use request_id::{RequestId, RequestIdTagger, REQUEST_ID_HEADER};
