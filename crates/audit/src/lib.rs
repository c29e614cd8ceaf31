//! Audit trail of successful mutations.
//!
//! Domain operations describe *what* changed as [`AuditEvent`]s; the
//! application layer attributes them to an actor and appends [`AuditEntry`]s
//! to the [`AuditLog`] after the change is durable.

pub mod entry;
pub mod event;
pub mod log;

pub use entry::AuditEntry;
pub use event::{AuditAction, AuditEvent, EntityKind};
pub use log::AuditLog;
