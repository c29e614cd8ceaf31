use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use salesreward_audit::AuditEntry;
use salesreward_catalog::Product;
use salesreward_core::{DomainError, DomainResult, Incentive};
use salesreward_sales::{SaleEntry, SaleRecord};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct UpsertProductRequest {
    /// A JSON number or a numeric string.
    pub unit_incentive: JsonValue,
}

impl UpsertProductRequest {
    pub fn incentive(&self) -> DomainResult<Incentive> {
        match &self.unit_incentive {
            JsonValue::Number(n) => Incentive::parse_input(&n.to_string()),
            JsonValue::String(s) => Incentive::parse_input(s),
            other => Err(DomainError::validation(format!(
                "unit_incentive must be a number (got {other})"
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RecordSaleRequest {
    pub date: NaiveDate,
    pub employee_name: String,
    pub product_name: String,
    pub quantity: i64,
}

impl From<RecordSaleRequest> for SaleEntry {
    fn from(body: RecordSaleRequest) -> Self {
        SaleEntry {
            date: body.date,
            employee_name: body.employee_name,
            product_name: body.product_name,
            quantity: body.quantity,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecentSalesQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub name: String,
    /// Stored value as-is (normally a number).
    pub unit_incentive: JsonValue,
}

impl From<&Product> for ProductResponse {
    fn from(p: &Product) -> Self {
        Self {
            name: p.name().to_string(),
            unit_incentive: p.raw_unit_incentive().as_json().clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaleResponse {
    /// Position in the ledger (the address used by `DELETE /sales/:position`).
    pub position: usize,
    pub date: JsonValue,
    pub employee_name: JsonValue,
    pub product_name: JsonValue,
    pub quantity: JsonValue,
    pub unit_incentive_at_sale: JsonValue,
    pub total_incentive: JsonValue,
}

impl SaleResponse {
    pub fn new(position: usize, record: &SaleRecord) -> Self {
        Self {
            position,
            date: record.date.as_json().clone(),
            employee_name: record.employee_name.as_json().clone(),
            product_name: record.product_name.as_json().clone(),
            quantity: record.quantity.as_json().clone(),
            unit_incentive_at_sale: record.unit_incentive_at_sale.as_json().clone(),
            total_incentive: record.total_incentive.as_json().clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuditEntryResponse {
    pub id: String,
    pub timestamp: String,
    pub actor: String,
    pub action: &'static str,
    pub entity: &'static str,
    pub detail: String,
}

impl From<&AuditEntry> for AuditEntryResponse {
    fn from(e: &AuditEntry) -> Self {
        Self {
            id: e.id().to_string(),
            timestamp: e.timestamp().to_rfc3339(),
            actor: e.actor().to_string(),
            action: e.action().as_str(),
            entity: e.entity().as_str(),
            detail: e.detail().to_string(),
        }
    }
}
