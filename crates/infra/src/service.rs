//! Application-level orchestration of catalog, ledger, and audit mutations.
//!
//! Every mutating operation follows the same pipeline:
//!
//! ```text
//! ActorContext + request
//!   ↓
//! 1. Authorize (capability check, no IO)
//!   ↓
//! 2. Load the whole collection from the repository
//!   ↓
//! 3. Mutate in memory (pure domain call, returns an AuditEvent or nothing)
//!   ↓
//! 4. Save the whole collection
//!   ↓
//! 5. Append one stamped audit entry (only after the save succeeded)
//! ```
//!
//! Failures in steps 1-3 leave storage untouched. Step 2 uses the strict
//! [`Repository::try_load`], so a collection that cannot be read is never
//! overwritten. A no-op mutation (deleting an absent name, inserting a
//! duplicate employee) skips steps 4 and 5.
//!
//! Once step 4 has succeeded the mutation is committed and the call returns
//! `Ok`. A failure in step 5 is logged at error level with the full entry.
//!
//! There is no lock held across steps 2-4. Two callers interleaving a
//! read-modify-write cycle can lose an update; the last save wins.

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

use salesreward_audit::{AuditEntry, AuditEvent, AuditLog};
use salesreward_auth::{ActorContext, AuthzError, Capability, authorize};
use salesreward_catalog::{EmployeeRoster, Product, ProductCatalog};
use salesreward_core::{DomainError, Incentive};
use salesreward_reports::{Report, ReportKind};
use salesreward_sales::{
    Ledger, LedgerSnapshot, PricingFallback, PricingResolver, SaleEntry, SaleRecord,
};

use crate::codec;
use crate::export::{ExportError, ExportFormat, ExportedReport, export};
use crate::store::{CollectionKind, Repository, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Structural input problem (empty key, bad quantity, malformed number).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Positional ledger address outside `[0, len)`.
    #[error("position {position} is out of range (ledger holds {len} records)")]
    OutOfRange { position: i64, len: usize },

    /// Missing identity or missing editor capability.
    #[error("{0}")]
    Unauthorized(String),

    /// A report sum left the decimal range (hand-edited ledger data).
    #[error("{0} overflowed while aggregating the ledger")]
    Overflow(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl From<DomainError> for ServiceError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) => ServiceError::Validation(msg),
            DomainError::OutOfRange { position, len } => ServiceError::OutOfRange { position, len },
            DomainError::InvalidId(msg) => ServiceError::Validation(msg),
            DomainError::Unauthorized => ServiceError::Unauthorized("unauthorized".to_string()),
            DomainError::Overflow(what) => ServiceError::Overflow(what),
        }
    }
}

impl From<AuthzError> for ServiceError {
    fn from(value: AuthzError) -> Self {
        ServiceError::Unauthorized(value.to_string())
    }
}

/// Whether the entry form has something to offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryReadiness {
    Ready,
    NoProducts,
    NoEmployees,
}

/// Choices for the sale entry form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryOptions {
    pub employees: Vec<String>,
    pub products: Vec<String>,
    pub readiness: EntryReadiness,
}

/// Outcome of [`IncentiveService::record_sale`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedSale {
    /// Ledger position of the new record at the time it was appended.
    pub position: usize,
    pub record: SaleRecord,
    /// Set when the sale was priced at zero.
    pub fallback: Option<PricingFallback>,
}

#[derive(Debug)]
pub struct IncentiveService<R> {
    repo: R,
}

impl<R> IncentiveService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }
}

impl<R: Repository> IncentiveService<R> {
    // -- catalog --------------------------------------------------------------

    pub fn list_products(&self) -> ProductCatalog {
        codec::decode_products(&self.repo.load(CollectionKind::Products))
    }

    /// Insert or replace a product's unit incentive.
    pub fn upsert_product(
        &self,
        actor: &ActorContext,
        name: &str,
        unit_incentive: Incentive,
    ) -> Result<Product, ServiceError> {
        authorize(actor, Capability::EditCatalog)?;

        let mut catalog = codec::decode_products(&self.repo.try_load(CollectionKind::Products)?);
        let event = catalog.upsert(name, unit_incentive)?;
        let product = catalog
            .get(name.trim())
            .cloned()
            .ok_or_else(|| ServiceError::Validation(format!("product {name} was not stored")))?;

        self.repo.save(&codec::encode_products(&catalog))?;
        self.audit(actor, event);
        Ok(product)
    }

    /// Remove a product. Returns `false` when it did not exist.
    pub fn delete_product(&self, actor: &ActorContext, name: &str) -> Result<bool, ServiceError> {
        authorize(actor, Capability::EditCatalog)?;

        let mut catalog = codec::decode_products(&self.repo.try_load(CollectionKind::Products)?);
        let Some(event) = catalog.delete(name) else {
            return Ok(false);
        };
        self.repo.save(&codec::encode_products(&catalog))?;
        self.audit(actor, event);
        Ok(true)
    }

    pub fn list_employees(&self) -> EmployeeRoster {
        codec::decode_employees(&self.repo.load(CollectionKind::Employees))
    }

    fn roster_for_update(&self) -> Result<EmployeeRoster, ServiceError> {
        Ok(codec::decode_employees(&self.repo.try_load(CollectionKind::Employees)?))
    }

    /// Add an employee. Returns `false` when the name was already present.
    pub fn upsert_employee(&self, actor: &ActorContext, name: &str) -> Result<bool, ServiceError> {
        authorize(actor, Capability::EditCatalog)?;

        let mut roster = self.roster_for_update()?;
        let Some(event) = roster.insert(name)? else {
            return Ok(false);
        };
        self.repo.save(&codec::encode_employees(&roster))?;
        self.audit(actor, event);
        Ok(true)
    }

    /// Remove an employee. Returns `false` when it did not exist.
    pub fn delete_employee(&self, actor: &ActorContext, name: &str) -> Result<bool, ServiceError> {
        authorize(actor, Capability::EditCatalog)?;

        let mut roster = self.roster_for_update()?;
        let Some(event) = roster.delete(name) else {
            return Ok(false);
        };
        self.repo.save(&codec::encode_employees(&roster))?;
        self.audit(actor, event);
        Ok(true)
    }

    // -- ledger ---------------------------------------------------------------

    pub fn entry_options(&self) -> EntryOptions {
        let products: Vec<String> = self.list_products().names().map(str::to_string).collect();
        let employees: Vec<String> = self.list_employees().names().map(str::to_string).collect();
        let readiness = if products.is_empty() {
            EntryReadiness::NoProducts
        } else if employees.is_empty() {
            EntryReadiness::NoEmployees
        } else {
            EntryReadiness::Ready
        };
        EntryOptions {
            employees,
            products,
            readiness,
        }
    }

    /// Price a sale against the current catalog and append it to the ledger.
    ///
    /// An unknown or unreadable product price does not block the sale; it is
    /// recorded at zero and the fallback is logged and returned.
    pub fn record_sale(
        &self,
        actor: &ActorContext,
        entry: &SaleEntry,
    ) -> Result<RecordedSale, ServiceError> {
        authorize(actor, Capability::RecordSales)?;

        let catalog = self.list_products();
        let (sale, priced) = entry.price(&PricingResolver::new(&catalog))?;
        if let Some(reason) = priced.fallback {
            tracing::warn!(
                product = sale.product_name(),
                quantity = sale.quantity(),
                ?reason,
                "sale priced at zero incentive"
            );
        }

        let mut ledger = self.ledger_for_update()?;
        let event = ledger.append(&sale);
        let position = ledger.len() - 1;
        self.repo.save(&codec::encode_ledger(&ledger))?;
        self.audit(actor, event);

        tracing::info!(
            actor = actor.display_name(),
            employee = sale.employee_name(),
            product = sale.product_name(),
            quantity = sale.quantity(),
            total = %sale.total_incentive(),
            "sale recorded"
        );
        Ok(RecordedSale {
            position,
            record: SaleRecord::from(&sale),
            fallback: priced.fallback,
        })
    }

    /// Delete the ledger record at `position` (0-based, current order).
    pub fn delete_sale(
        &self,
        actor: &ActorContext,
        position: i64,
    ) -> Result<SaleRecord, ServiceError> {
        authorize(actor, Capability::DeleteSales)?;

        let mut ledger = self.ledger_for_update()?;
        let index = usize::try_from(position).map_err(|_| ServiceError::OutOfRange {
            position,
            len: ledger.len(),
        })?;
        let (removed, event) = ledger.delete_at(index)?;
        self.repo.save(&codec::encode_ledger(&ledger))?;
        self.audit(actor, event);
        Ok(removed)
    }

    /// The last `n` ledger records with their positions, oldest first.
    pub fn recent_sales(&self, n: usize) -> Vec<(usize, SaleRecord)> {
        let ledger = self.ledger();
        let first = ledger.len() - ledger.tail(n).len();
        ledger
            .tail(n)
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, record)| (first + i, record))
            .collect()
    }

    pub fn ledger_snapshot(&self) -> LedgerSnapshot {
        self.ledger().snapshot()
    }

    fn ledger(&self) -> Ledger {
        codec::decode_ledger(&self.repo.load(CollectionKind::Sales))
    }

    fn ledger_for_update(&self) -> Result<Ledger, ServiceError> {
        Ok(codec::decode_ledger(&self.repo.try_load(CollectionKind::Sales)?))
    }

    // -- reports --------------------------------------------------------------

    pub fn report(&self, kind: ReportKind) -> Result<Report, ServiceError> {
        Ok(Report::build(kind, &self.ledger_snapshot())?)
    }

    pub fn export_report(
        &self,
        kind: ReportKind,
        format: ExportFormat,
    ) -> Result<ExportedReport, ServiceError> {
        Ok(export(&self.report(kind)?, format)?)
    }

    // -- audit ----------------------------------------------------------------

    /// The whole audit log, in append order.
    pub fn audit_entries(&self) -> AuditLog {
        codec::decode_audit_log(&self.repo.load(CollectionKind::AuditLog))
    }

    /// Append one entry for a mutation that has already been saved.
    ///
    /// Rows already stored are not re-encoded, and an unreadable audit file is
    /// left as it is.
    fn audit(&self, actor: &ActorContext, event: AuditEvent) {
        let event_type = event.event_type();
        let entry = AuditEntry::stamp(event, actor.display_name(), Utc::now());

        match self
            .repo
            .append(CollectionKind::AuditLog, codec::encode_audit_entry(&entry))
        {
            Ok(()) => tracing::debug!(
                event_type,
                actor = entry.actor(),
                detail = entry.detail(),
                "audit entry appended"
            ),
            Err(e) => tracing::error!(
                error = %e,
                id = %entry.id(),
                timestamp = %entry.timestamp().to_rfc3339(),
                actor = entry.actor(),
                action = entry.action().as_str(),
                entity = entry.entity().as_str(),
                detail = entry.detail(),
                "mutation committed but its audit entry was not stored"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use salesreward_audit::{AuditAction, EntityKind};
    use salesreward_core::Decimal;

    use crate::store::{InMemoryStore, Row, Table};

    fn service() -> IncentiveService<InMemoryStore> {
        IncentiveService::new(InMemoryStore::new())
    }

    fn editor() -> ActorContext {
        ActorContext::editor("admin")
    }

    fn incentive(v: i64) -> Incentive {
        Incentive::new(Decimal::from(v)).unwrap()
    }

    fn entry(employee: &str, product: &str, quantity: i64) -> SaleEntry {
        SaleEntry {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            employee_name: employee.to_string(),
            product_name: product.to_string(),
            quantity,
        }
    }

    fn seeded() -> IncentiveService<InMemoryStore> {
        let svc = service();
        svc.upsert_product(&editor(), "Widget", incentive(10)).unwrap();
        svc.upsert_employee(&editor(), "Alice").unwrap();
        svc
    }

    #[test]
    fn catalog_mutations_require_editor() {
        let svc = service();
        let viewer = ActorContext::viewer("bob");

        let err = svc.upsert_product(&viewer, "Widget", incentive(1)).unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));
        assert!(svc.list_products().is_empty());
        assert!(svc.audit_entries().is_empty());

        assert!(matches!(
            svc.upsert_employee(&ActorContext::anonymous(), "Alice"),
            Err(ServiceError::Unauthorized(_))
        ));
    }

    #[test]
    fn upsert_product_replaces_and_audits() {
        let svc = service();
        svc.upsert_product(&editor(), "Widget", incentive(10)).unwrap();
        let updated = svc.upsert_product(&editor(), " Widget ", incentive(15)).unwrap();

        assert_eq!(updated.unit_incentive(), Some(incentive(15)));
        assert_eq!(svc.list_products().len(), 1);

        let log = svc.audit_entries();
        let actions: Vec<_> = log.iter().map(|e| e.action()).collect();
        assert_eq!(actions, vec![AuditAction::Create, AuditAction::Update]);
        assert!(log.iter().all(|e| e.actor() == "admin"));
    }

    #[test]
    fn empty_product_name_is_rejected_without_side_effects() {
        let svc = service();
        assert!(matches!(
            svc.upsert_product(&editor(), "  ", incentive(1)),
            Err(ServiceError::Validation(_))
        ));
        assert!(svc.audit_entries().is_empty());
    }

    #[test]
    fn deleting_absent_entries_is_a_silent_no_op() {
        let svc = service();
        assert_eq!(svc.delete_product(&editor(), "Ghost").unwrap(), false);
        assert_eq!(svc.delete_employee(&editor(), "Ghost").unwrap(), false);
        assert!(svc.audit_entries().is_empty());
    }

    #[test]
    fn duplicate_employee_is_not_audited() {
        let svc = service();
        assert!(svc.upsert_employee(&editor(), "Alice").unwrap());
        assert!(!svc.upsert_employee(&editor(), "Alice").unwrap());
        assert_eq!(svc.list_employees().len(), 1);
        assert_eq!(svc.audit_entries().len(), 1);
    }

    #[test]
    fn entry_options_report_readiness() {
        let svc = service();
        assert_eq!(svc.entry_options().readiness, EntryReadiness::NoProducts);

        svc.upsert_product(&editor(), "Widget", incentive(10)).unwrap();
        assert_eq!(svc.entry_options().readiness, EntryReadiness::NoEmployees);

        svc.upsert_employee(&editor(), "Alice").unwrap();
        let options = svc.entry_options();
        assert_eq!(options.readiness, EntryReadiness::Ready);
        assert_eq!(options.products, vec!["Widget"]);
        assert_eq!(options.employees, vec!["Alice"]);
    }

    #[test]
    fn any_identified_actor_may_record_a_sale() {
        let svc = seeded();
        let recorded = svc
            .record_sale(&ActorContext::viewer("clerk"), &entry("Alice", "Widget", 3))
            .unwrap();

        assert_eq!(recorded.position, 0);
        assert_eq!(recorded.fallback, None);
        assert_eq!(recorded.record.total_incentive.to_decimal(), Some(Decimal::from(30)));

        let last = svc.audit_entries().entries().last().cloned().unwrap();
        assert_eq!(last.entity(), EntityKind::Sale);
        assert_eq!(last.actor(), "clerk");

        assert!(matches!(
            svc.record_sale(&ActorContext::anonymous(), &entry("Alice", "Widget", 1)),
            Err(ServiceError::Unauthorized(_))
        ));
    }

    #[test]
    fn unknown_product_is_recorded_at_zero() {
        let svc = seeded();
        let recorded = svc
            .record_sale(&editor(), &entry("Alice", "Unknown", 5))
            .unwrap();

        assert_eq!(recorded.fallback, Some(PricingFallback::UnknownProduct));
        assert_eq!(recorded.record.total_incentive.to_decimal(), Some(Decimal::ZERO));
        assert_eq!(svc.ledger_snapshot().len(), 1);
    }

    #[test]
    fn invalid_quantity_is_rejected_and_not_audited() {
        let svc = seeded();
        let before = svc.audit_entries().len();
        assert!(matches!(
            svc.record_sale(&editor(), &entry("Alice", "Widget", 0)),
            Err(ServiceError::Validation(_))
        ));
        assert!(svc.ledger_snapshot().is_empty());
        assert_eq!(svc.audit_entries().len(), before);
    }

    #[test]
    fn price_change_does_not_rewrite_history() {
        let svc = seeded();
        svc.record_sale(&editor(), &entry("Alice", "Widget", 3)).unwrap();
        svc.upsert_product(&editor(), "Widget", incentive(15)).unwrap();
        svc.record_sale(&editor(), &entry("Alice", "Widget", 2)).unwrap();

        let snapshot = svc.ledger_snapshot();
        assert_eq!(
            snapshot.as_slice()[0].total_incentive.to_decimal(),
            Some(Decimal::from(30))
        );

        let detail = svc.report(ReportKind::EmployeeProductDetail).unwrap();
        assert_eq!(detail.len(), 2);
        let summary = serde_json::to_value(svc.report(ReportKind::SalesSummary).unwrap()).unwrap();
        assert_eq!(
            summary,
            serde_json::json!([{ "employee_name": "Alice", "quantity": 5, "total_incentive": 60 }])
        );
    }

    #[test]
    fn delete_sale_requires_editor_and_valid_position() {
        let svc = seeded();
        for q in 1..=3 {
            svc.record_sale(&editor(), &entry("Alice", "Widget", q)).unwrap();
        }

        assert!(matches!(
            svc.delete_sale(&ActorContext::viewer("clerk"), 0),
            Err(ServiceError::Unauthorized(_))
        ));
        assert!(matches!(
            svc.delete_sale(&editor(), 3),
            Err(ServiceError::OutOfRange { position: 3, len: 3 })
        ));
        assert!(matches!(
            svc.delete_sale(&editor(), -1),
            Err(ServiceError::OutOfRange { position: -1, len: 3 })
        ));

        let removed = svc.delete_sale(&editor(), 0).unwrap();
        assert_eq!(removed.quantity.to_text(), "1");
        let removed = svc.delete_sale(&editor(), 0).unwrap();
        assert_eq!(removed.quantity.to_text(), "2");

        let last = svc.audit_entries().entries().last().cloned().unwrap();
        assert_eq!(last.action(), AuditAction::Delete);
        assert_eq!(last.detail(), "#0: 2024-03-01 Alice Widget x2");
    }

    #[test]
    fn recent_sales_are_oldest_first() {
        let svc = seeded();
        for q in 1..=4 {
            svc.record_sale(&editor(), &entry("Alice", "Widget", q)).unwrap();
        }
        let recent: Vec<_> = svc
            .recent_sales(2)
            .iter()
            .map(|(position, r)| (*position, r.quantity.to_text()))
            .collect();
        assert_eq!(recent, vec![(2, "3".to_string()), (3, "4".to_string())]);
    }

    #[test]
    fn export_uses_report_name() {
        let svc = seeded();
        svc.record_sale(&editor(), &entry("Alice", "Widget", 1)).unwrap();
        let out = svc
            .export_report(ReportKind::SalesDetailLog, ExportFormat::Csv)
            .unwrap();
        assert_eq!(out.file_name, "sales_detail_log.csv");
    }

    /// Fails every audit-log write; other collections behave normally.
    struct AuditDown(InMemoryStore);

    impl Repository for AuditDown {
        fn try_load(&self, kind: CollectionKind) -> Result<Table, StoreError> {
            self.0.try_load(kind)
        }

        fn save(&self, table: &Table) -> Result<(), StoreError> {
            if table.kind() == CollectionKind::AuditLog {
                return Err(StoreError::Unavailable("audit down".to_string()));
            }
            self.0.save(table)
        }
    }

    #[test]
    fn committed_sale_is_not_reported_as_failed_when_audit_write_fails() {
        let inner = InMemoryStore::new();
        let catalog = codec::encode_products(&{
            let mut c = ProductCatalog::new();
            c.upsert("Widget", incentive(10)).unwrap();
            c
        });
        inner.save(&catalog).unwrap();
        let svc = IncentiveService::new(AuditDown(inner));

        let first = svc.record_sale(&editor(), &entry("Alice", "Widget", 1)).unwrap();
        let second = svc.record_sale(&editor(), &entry("Alice", "Widget", 2)).unwrap();

        assert_eq!((first.position, second.position), (0, 1));
        assert_eq!(svc.ledger_snapshot().len(), 2);
        assert!(svc.audit_entries().is_empty());
        assert!(svc.delete_sale(&editor(), 0).is_ok());
        assert_eq!(svc.ledger_snapshot().len(), 1);
    }

    #[test]
    fn unreadable_collection_blocks_writes_but_not_reads() {
        struct Unreadable(InMemoryStore);

        impl Repository for Unreadable {
            fn try_load(&self, kind: CollectionKind) -> Result<Table, StoreError> {
                match kind {
                    CollectionKind::Employees => Err(StoreError::Unreadable {
                        collection: kind,
                        reason: "garbage".to_string(),
                    }),
                    _ => self.0.try_load(kind),
                }
            }

            fn save(&self, table: &Table) -> Result<(), StoreError> {
                self.0.save(table)
            }
        }

        let svc = IncentiveService::new(Unreadable(InMemoryStore::new()));
        assert!(svc.list_employees().is_empty());
        assert!(matches!(
            svc.upsert_employee(&editor(), "Alice"),
            Err(ServiceError::Store(StoreError::Unreadable { .. }))
        ));
        assert!(svc.audit_entries().is_empty());

        // Other collections are unaffected.
        svc.upsert_product(&editor(), "Widget", incentive(1)).unwrap();
        assert_eq!(svc.audit_entries().len(), 1);
    }

    #[test]
    fn overflowing_ledger_totals_fail_reports_without_panicking() {
        let svc = service();
        let mut sales = Table::empty(CollectionKind::Sales);
        let row: Row = serde_json::json!({
            "date": "2024-03-01",
            "employee_name": "Alice",
            "product_name": "Widget",
            "quantity": 1,
            "unit_incentive_at_sale": "1",
            "total_incentive": "79228162514264337593543950335",
        })
        .as_object()
        .cloned()
        .unwrap();
        sales.push(row.clone());
        sales.push(row);
        svc.repository().save(&sales).unwrap();

        assert!(matches!(
            svc.report(ReportKind::SalesSummary),
            Err(ServiceError::Overflow(_))
        ));
        assert!(matches!(
            svc.export_report(ReportKind::EmployeeProductDetail, ExportFormat::Csv),
            Err(ServiceError::Overflow(_))
        ));
        assert_eq!(svc.report(ReportKind::SalesDetailLog).unwrap().len(), 2);
    }
}
