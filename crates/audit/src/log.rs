use chrono::{DateTime, Utc};

use crate::entry::AuditEntry;
use crate::event::AuditEvent;

/// Append-only audit trail.
///
/// There is deliberately no API to edit or remove entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a log from previously persisted entries (in append order).
    pub fn from_entries(entries: Vec<AuditEntry>) -> Self {
        Self { entries }
    }

    pub fn append(&mut self, entry: AuditEntry) {
        self.entries.push(entry);
    }

    /// Stamp `event` with `actor` and `at`, append it, and return the stored entry.
    pub fn record(
        &mut self,
        event: AuditEvent,
        actor: impl Into<String>,
        at: DateTime<Utc>,
    ) -> &AuditEntry {
        self.entries.push(AuditEntry::stamp(event, actor, at));
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &AuditEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<AuditEntry> {
        self.entries
    }
}
