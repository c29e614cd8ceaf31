//! Named report views, as handed to the export layer.
//!
//! A [`Report`] is an ordered list of rows, each an ordered field -> value
//! mapping. Numbers are plain numbers; formatting is left to the encoder.

use core::fmt;
use core::str::FromStr;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use salesreward_core::{Decimal, DomainResult, cell::decimal_to_json};
use salesreward_sales::LedgerSnapshot;

use crate::coerce::{CoercedSale, coerce_snapshot};
use crate::detail::detail_by_employee_product;
use crate::summary::summary_by_employee;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    SalesSummary,
    EmployeeProductDetail,
    SalesDetailLog,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [
        ReportKind::SalesSummary,
        ReportKind::EmployeeProductDetail,
        ReportKind::SalesDetailLog,
    ];

    /// Stable report name, also used as the export file stem.
    pub fn name(self) -> &'static str {
        match self {
            ReportKind::SalesSummary => "sales_summary_report",
            ReportKind::EmployeeProductDetail => "employee_product_detail",
            ReportKind::SalesDetailLog => "sales_detail_log",
        }
    }

    pub fn columns(self) -> &'static [&'static str] {
        match self {
            ReportKind::SalesSummary => &["employee_name", "quantity", "total_incentive"],
            ReportKind::EmployeeProductDetail => &[
                "employee_name",
                "product_name",
                "unit_incentive_at_sale",
                "quantity",
                "total_incentive",
            ],
            ReportKind::SalesDetailLog => &[
                "date",
                "employee_name",
                "product_name",
                "quantity",
                "unit_incentive_at_sale",
                "total_incentive",
            ],
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the full report name or the short alias (`summary`, `detail`, `log`).
impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "summary" | "sales_summary_report" => Ok(ReportKind::SalesSummary),
            "detail" | "employee_product_detail" => Ok(ReportKind::EmployeeProductDetail),
            "log" | "sales_detail_log" => Ok(ReportKind::SalesDetailLog),
            other => Err(format!("unknown report: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportValue {
    Text(String),
    Number(Decimal),
}

impl ReportValue {
    /// Plain rendering used by text encoders (no currency, no grouping).
    pub fn to_plain_string(&self) -> String {
        match self {
            ReportValue::Text(s) => s.clone(),
            ReportValue::Number(n) => n.normalize().to_string(),
        }
    }
}

impl Serialize for ReportValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ReportValue::Text(s) => serializer.serialize_str(s),
            ReportValue::Number(n) => decimal_to_json(*n).serialize(serializer),
        }
    }
}

impl From<&str> for ReportValue {
    fn from(value: &str) -> Self {
        ReportValue::Text(value.to_string())
    }
}

impl From<Decimal> for ReportValue {
    fn from(value: Decimal) -> Self {
        ReportValue::Number(value)
    }
}

/// An aggregated, sorted report.
///
/// Every row carries exactly one value per column, in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    kind: ReportKind,
    rows: Vec<Vec<ReportValue>>,
}

impl Report {
    /// Build the named view from a ledger snapshot.
    ///
    /// The grouped views fail only when a sum overflows the decimal range.
    pub fn build(kind: ReportKind, snapshot: &LedgerSnapshot) -> DomainResult<Self> {
        let coerced = coerce_snapshot(snapshot);
        let rows = match kind {
            ReportKind::SalesSummary => summary_by_employee(&coerced)?
                .into_iter()
                .map(|s| {
                    vec![
                        ReportValue::Text(s.employee_name),
                        s.quantity.into(),
                        s.total_incentive.into(),
                    ]
                })
                .collect(),
            ReportKind::EmployeeProductDetail => detail_by_employee_product(&coerced)?
                .into_iter()
                .map(|d| {
                    vec![
                        ReportValue::Text(d.employee_name),
                        ReportValue::Text(d.product_name),
                        d.unit_incentive_at_sale.into(),
                        d.quantity.into(),
                        d.total_incentive.into(),
                    ]
                })
                .collect(),
            ReportKind::SalesDetailLog => coerced.into_iter().map(log_row).collect(),
        };
        Ok(Self { kind, rows })
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn columns(&self) -> &'static [&'static str] {
        self.kind.columns()
    }

    pub fn rows(&self) -> &[Vec<ReportValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows as ordered `(field, value)` pairs.
    pub fn records(&self) -> impl Iterator<Item = Vec<(&'static str, &ReportValue)>> + '_ {
        let columns = self.columns();
        self.rows
            .iter()
            .map(move |row| columns.iter().copied().zip(row.iter()).collect())
    }
}

fn log_row(sale: CoercedSale) -> Vec<ReportValue> {
    vec![
        ReportValue::Text(sale.date),
        ReportValue::Text(sale.employee_name),
        ReportValue::Text(sale.product_name),
        sale.quantity.into(),
        sale.unit_incentive_at_sale.into(),
        sale.total_incentive.into(),
    ]
}

/// Serializes as an array of objects, fields in column order.
impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let columns = self.columns();
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(&OrderedRow { columns, values: row })?;
        }
        seq.end()
    }
}

struct OrderedRow<'a> {
    columns: &'static [&'static str],
    values: &'a [ReportValue],
}

impl Serialize for OrderedRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, value) in self.columns.iter().zip(self.values) {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use salesreward_core::{Cell, Incentive};
    use salesreward_sales::{Ledger, Sale, SaleRecord};

    fn sale(employee: &str, product: &str, unit: i64, quantity: u32) -> Sale {
        Sale::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            employee,
            product,
            quantity,
            Incentive::new(Decimal::from(unit)).unwrap(),
        )
        .unwrap()
    }

    fn snapshot(sales: &[Sale]) -> LedgerSnapshot {
        let mut ledger = Ledger::new();
        for s in sales {
            ledger.append(s);
        }
        ledger.snapshot()
    }

    #[test]
    fn report_names_parse_from_aliases() {
        assert_eq!("summary".parse::<ReportKind>(), Ok(ReportKind::SalesSummary));
        assert_eq!(
            "employee_product_detail".parse::<ReportKind>(),
            Ok(ReportKind::EmployeeProductDetail)
        );
        assert_eq!("LOG".parse::<ReportKind>(), Ok(ReportKind::SalesDetailLog));
        assert!("weekly".parse::<ReportKind>().is_err());
    }

    #[test]
    fn summary_report_for_single_sale() {
        let report = Report::build(
            ReportKind::SalesSummary,
            &snapshot(&[sale("Alice", "Widget", 10, 3)]),
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!([{ "employee_name": "Alice", "quantity": 3, "total_incentive": 30 }])
        );
    }

    #[test]
    fn detail_report_splits_historical_prices() {
        let report = Report::build(
            ReportKind::EmployeeProductDetail,
            &snapshot(&[sale("Alice", "Widget", 10, 2), sale("Alice", "Widget", 15, 1)]),
        )
        .unwrap();
        assert_eq!(report.len(), 2);
        let units: Vec<_> = report.rows().iter().map(|r| r[2].clone()).collect();
        assert_eq!(
            units,
            vec![
                ReportValue::Number(Decimal::from(10)),
                ReportValue::Number(Decimal::from(15))
            ]
        );
    }

    #[test]
    fn log_report_keeps_malformed_rows_in_order() {
        let broken = SaleRecord {
            date: Cell::text("someday"),
            employee_name: Cell::text("Bob"),
            product_name: Cell::text("Gizmo"),
            quantity: Cell::text("lots"),
            unit_incentive_at_sale: Cell::blank(),
            total_incentive: Cell::text("?"),
        };
        let mut records = snapshot(&[sale("Alice", "Widget", 10, 1)]).as_slice().to_vec();
        records.push(broken);

        let report =
            Report::build(ReportKind::SalesDetailLog, &LedgerSnapshot::from(records)).unwrap();
        assert_eq!(report.len(), 2);
        let last: Vec<_> = report.records().last().unwrap();
        assert_eq!(last[0], ("date", &ReportValue::Text("someday".to_string())));
        assert_eq!(last[3], ("quantity", &ReportValue::Number(Decimal::ZERO)));
        assert_eq!(last[5], ("total_incentive", &ReportValue::Number(Decimal::ZERO)));
    }

    #[test]
    fn json_preserves_column_order() {
        let report = Report::build(
            ReportKind::SalesDetailLog,
            &snapshot(&[sale("Alice", "Widget", 10, 1)]),
        )
        .unwrap();
        let text = serde_json::to_string(&report).unwrap();
        let date = text.find("\"date\"").unwrap();
        let total = text.find("\"total_incentive\"").unwrap();
        assert!(date < total);
    }

    #[test]
    fn empty_ledger_gives_empty_reports() {
        for kind in ReportKind::ALL {
            assert!(Report::build(kind, &LedgerSnapshot::empty()).unwrap().is_empty());
        }
    }

    #[test]
    fn overflowing_totals_fail_grouped_views_but_not_the_log() {
        let near_max = SaleRecord {
            date: Cell::text("2024-03-01"),
            employee_name: Cell::text("Alice"),
            product_name: Cell::text("Widget"),
            quantity: Cell::text("1"),
            unit_incentive_at_sale: Cell::text("1"),
            total_incentive: Cell::text("79228162514264337593543950335"),
        };
        let snapshot = LedgerSnapshot::from(vec![near_max.clone(), near_max]);

        for kind in [ReportKind::SalesSummary, ReportKind::EmployeeProductDetail] {
            assert!(matches!(
                Report::build(kind, &snapshot),
                Err(salesreward_core::DomainError::Overflow(_))
            ));
        }
        assert_eq!(Report::build(ReportKind::SalesDetailLog, &snapshot).unwrap().len(), 2);
    }
}
