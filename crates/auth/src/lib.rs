//! `salesreward-auth`: pure authorization boundary.
//!
//! Decoupled from HTTP and storage: callers resolve an [`ActorContext`] and pass it in.

pub mod actor;
pub mod authorize;
pub mod capability;
pub mod credentials;

pub use actor::ActorContext;
pub use authorize::{AuthzError, authorize};
pub use capability::Capability;
pub use credentials::{SecretVerifier, SharedSecret, resolve_actor};
