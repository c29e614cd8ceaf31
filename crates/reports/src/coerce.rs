//! Coercion pass over ledger rows.
//!
//! Numeric fields that do not coerce are read as zero. Rows are never dropped,
//! so a malformed row still shows up (zeroed) in the detail log.

use salesreward_core::{Cell, Decimal, DomainResult, checked_sum};
use salesreward_sales::{LedgerSnapshot, SaleRecord};

/// A ledger row with its numeric fields coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercedSale {
    pub date: String,
    pub employee_name: String,
    pub product_name: String,
    pub quantity: Decimal,
    pub unit_incentive_at_sale: Decimal,
    pub total_incentive: Decimal,
}

impl From<&SaleRecord> for CoercedSale {
    fn from(record: &SaleRecord) -> Self {
        Self {
            date: record.date.to_text(),
            employee_name: record.employee_name.to_text(),
            product_name: record.product_name.to_text(),
            quantity: or_zero(&record.quantity),
            unit_incentive_at_sale: or_zero(&record.unit_incentive_at_sale),
            total_incentive: or_zero(&record.total_incentive),
        }
    }
}

fn or_zero(cell: &Cell) -> Decimal {
    cell.to_decimal().unwrap_or(Decimal::ZERO)
}

/// Coerce every row of the snapshot, keeping ledger order.
pub fn coerce_snapshot(snapshot: &LedgerSnapshot) -> Vec<CoercedSale> {
    snapshot.iter().map(CoercedSale::from).collect()
}

/// Sum of `total_incentive` over coerced rows.
pub fn total_incentive(rows: &[CoercedSale]) -> DomainResult<Decimal> {
    rows.iter().try_fold(Decimal::ZERO, |acc, r| {
        checked_sum(acc, r.total_incentive, "total_incentive")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn malformed_numbers_become_zero_and_row_is_kept() {
        let record = SaleRecord {
            date: Cell::text("2024-01-02"),
            employee_name: Cell::text("Alice"),
            product_name: Cell::text("Widget"),
            quantity: Cell::text("three"),
            unit_incentive_at_sale: Cell::text(" 10 "),
            total_incentive: Cell::blank(),
        };
        let snapshot = LedgerSnapshot::from(vec![record]);

        let rows = coerce_snapshot(&snapshot);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quantity, Decimal::ZERO);
        assert_eq!(rows[0].unit_incentive_at_sale, Decimal::from(10));
        assert_eq!(rows[0].total_incentive, Decimal::ZERO);
    }

    #[test]
    fn totals_sum_coerced_values() {
        let rows: Vec<_> = [json!(30), json!("12.5"), json!(null)]
            .into_iter()
            .map(|total| {
                CoercedSale::from(&SaleRecord {
                    total_incentive: Cell::from_json(total),
                    ..SaleRecord::default()
                })
            })
            .collect();
        assert_eq!(total_incentive(&rows), Ok(Decimal::new(425, 1)));
        assert_eq!(total_incentive(&[]), Ok(Decimal::ZERO));
    }
}
