use std::sync::Arc;

use salesreward_audit::{AuditEvent, EntityKind};
use salesreward_core::{DomainError, DomainResult};

use crate::sale::{Sale, SaleRecord};

/// The ordered sequence of all recorded sales.
///
/// Positions are dense: `[0, len)` is always valid and deletion compacts the
/// tail downward. Insertion order is significant (recent-N views and positional
/// deletion both address it).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    records: Vec<SaleRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted rows (in stored order).
    pub fn from_records(records: Vec<SaleRecord>) -> Self {
        Self { records }
    }

    /// Append a priced sale at the end.
    pub fn append(&mut self, sale: &Sale) -> AuditEvent {
        let record = SaleRecord::from(sale);
        let detail = format!(
            "{} (unit {}, total {})",
            record.describe(),
            sale.unit_incentive_at_sale(),
            sale.total_incentive()
        );
        self.records.push(record);
        AuditEvent::created(EntityKind::Sale, detail)
    }

    /// Remove the record at `position` and shift later records down by one.
    ///
    /// The audit description is taken from the record before it is removed.
    pub fn delete_at(&mut self, position: usize) -> DomainResult<(SaleRecord, AuditEvent)> {
        if position >= self.records.len() {
            return Err(DomainError::out_of_range(
                i64::try_from(position).unwrap_or(i64::MAX),
                self.records.len(),
            ));
        }
        let detail = format!("#{position}: {}", self.records[position].describe());
        let removed = self.records.remove(position);
        Ok((removed, AuditEvent::deleted(EntityKind::Sale, detail)))
    }

    /// Immutable copy of the ledger as it is now.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            records: Arc::from(self.records.as_slice()),
        }
    }

    /// The last `n` records, oldest first.
    pub fn tail(&self, n: usize) -> &[SaleRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    pub fn get(&self, position: usize) -> Option<&SaleRecord> {
        self.records.get(position)
    }

    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<SaleRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Point-in-time view of the ledger.
///
/// Cheap to clone and unaffected by later ledger mutations.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSnapshot {
    records: Arc<[SaleRecord]>,
}

impl LedgerSnapshot {
    pub fn empty() -> Self {
        Self {
            records: Arc::from(Vec::new()),
        }
    }

    /// Records in ledger order. Call again to restart.
    pub fn iter(&self) -> std::slice::Iter<'_, SaleRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[SaleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for LedgerSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<SaleRecord>> for LedgerSnapshot {
    fn from(records: Vec<SaleRecord>) -> Self {
        Self {
            records: Arc::from(records),
        }
    }
}

impl<'a> IntoIterator for &'a LedgerSnapshot {
    type Item = &'a SaleRecord;
    type IntoIter = std::slice::Iter<'a, SaleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
