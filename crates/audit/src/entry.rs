use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use salesreward_core::AuditEntryId;

use crate::event::{AuditAction, AuditEvent, EntityKind};

/// A stamped audit record: who did what, and when.
///
/// This is the unit appended to the audit log. Entries are never mutated after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    id: AuditEntryId,
    timestamp: DateTime<Utc>,
    actor: String,
    action: AuditAction,
    entity: EntityKind,
    detail: String,
}

impl AuditEntry {
    pub fn new(
        id: AuditEntryId,
        timestamp: DateTime<Utc>,
        actor: impl Into<String>,
        action: AuditAction,
        entity: EntityKind,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            id,
            timestamp,
            actor: actor.into(),
            action,
            entity,
            detail: detail.into(),
        }
    }

    /// Attribute an event to `actor` at `timestamp`.
    pub fn stamp(event: AuditEvent, actor: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(
            AuditEntryId::new(),
            timestamp,
            actor,
            event.action,
            event.entity,
            event.detail,
        )
    }

    pub fn id(&self) -> AuditEntryId {
        self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn action(&self) -> AuditAction {
        self.action
    }

    pub fn entity(&self) -> EntityKind {
        self.entity
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}
