//! Row codecs between persisted tables and domain collections.
//!
//! Decoding is lenient. Catalog and ledger rows keep raw cells so that a
//! hand-edited value survives a load/save cycle untouched. Audit rows that
//! cannot be read back as entries are skipped on read (with a warning) but
//! left in the stored table, since appends never rewrite existing rows.

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

use salesreward_audit::{AuditEntry, AuditLog};
use salesreward_catalog::{Employee, EmployeeRoster, Product, ProductCatalog};
use salesreward_core::{AuditEntryId, Cell};
use salesreward_sales::{Ledger, SaleRecord};

use crate::store::{CollectionKind, Row, Table};

fn cell(row: &Row, column: &str) -> Cell {
    row.get(column)
        .cloned()
        .map(Cell::from_json)
        .unwrap_or_else(Cell::blank)
}

fn text(row: &Row, column: &str) -> String {
    cell(row, column).to_text().trim().to_string()
}

pub fn decode_products(table: &Table) -> ProductCatalog {
    ProductCatalog::from_products(
        table
            .rows()
            .iter()
            .map(|row| Product::from_raw(text(row, "name"), cell(row, "unit_incentive"))),
    )
}

pub fn encode_products(catalog: &ProductCatalog) -> Table {
    let rows = catalog.iter().map(|p| {
        let mut row = Row::new();
        row.insert("name".into(), JsonValue::String(p.name().to_string()));
        row.insert("unit_incentive".into(), p.raw_unit_incentive().as_json().clone());
        row
    });
    Table::normalized(CollectionKind::Products, rows)
}

pub fn decode_employees(table: &Table) -> EmployeeRoster {
    EmployeeRoster::from_employees(
        table
            .rows()
            .iter()
            .map(|row| Employee::new(text(row, "name"))),
    )
}

pub fn encode_employees(roster: &EmployeeRoster) -> Table {
    let rows = roster.iter().map(|e| {
        let mut row = Row::new();
        row.insert("name".into(), JsonValue::String(e.name().to_string()));
        row
    });
    Table::normalized(CollectionKind::Employees, rows)
}

pub fn decode_ledger(table: &Table) -> Ledger {
    let records = table
        .rows()
        .iter()
        .map(|row| SaleRecord {
            date: cell(row, "date"),
            employee_name: cell(row, "employee_name"),
            product_name: cell(row, "product_name"),
            quantity: cell(row, "quantity"),
            unit_incentive_at_sale: cell(row, "unit_incentive_at_sale"),
            total_incentive: cell(row, "total_incentive"),
        })
        .filter(|record| !record.is_blank())
        .collect();
    Ledger::from_records(records)
}

pub fn encode_sale(record: &SaleRecord) -> Row {
    let mut row = Row::new();
    row.insert("date".into(), record.date.as_json().clone());
    row.insert("employee_name".into(), record.employee_name.as_json().clone());
    row.insert("product_name".into(), record.product_name.as_json().clone());
    row.insert("quantity".into(), record.quantity.as_json().clone());
    row.insert(
        "unit_incentive_at_sale".into(),
        record.unit_incentive_at_sale.as_json().clone(),
    );
    row.insert("total_incentive".into(), record.total_incentive.as_json().clone());
    row
}

pub fn encode_ledger(ledger: &Ledger) -> Table {
    Table::normalized(CollectionKind::Sales, ledger.records().iter().map(encode_sale))
}

pub fn encode_audit_entry(entry: &AuditEntry) -> Row {
    let mut row = Row::new();
    row.insert("id".into(), JsonValue::String(entry.id().to_string()));
    row.insert(
        "timestamp".into(),
        JsonValue::String(entry.timestamp().to_rfc3339()),
    );
    row.insert("actor".into(), JsonValue::String(entry.actor().to_string()));
    row.insert(
        "action".into(),
        JsonValue::String(entry.action().as_str().to_string()),
    );
    row.insert(
        "entity".into(),
        JsonValue::String(entry.entity().as_str().to_string()),
    );
    row.insert("detail".into(), JsonValue::String(entry.detail().to_string()));
    row
}

fn decode_audit_entry(row: &Row) -> Result<AuditEntry, String> {
    let id: AuditEntryId = text(row, "id").parse().map_err(|e| format!("{e}"))?;
    let timestamp = DateTime::parse_from_rfc3339(&text(row, "timestamp"))
        .map_err(|e| format!("bad timestamp: {e}"))?
        .with_timezone(&Utc);
    let action = text(row, "action").parse()?;
    let entity = text(row, "entity").parse()?;
    Ok(AuditEntry::new(
        id,
        timestamp,
        cell(row, "actor").to_text(),
        action,
        entity,
        cell(row, "detail").to_text(),
    ))
}

pub fn decode_audit_log(table: &Table) -> AuditLog {
    let entries = table
        .rows()
        .iter()
        .enumerate()
        .filter_map(|(index, row)| match decode_audit_entry(row) {
            Ok(entry) => Some(entry),
            Err(reason) => {
                tracing::warn!(index, %reason, "skipping unreadable audit row");
                None
            }
        })
        .collect();
    AuditLog::from_entries(entries)
}
