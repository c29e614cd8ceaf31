//! Report building over ledger snapshots.
//!
//! Pure aggregation: reads a [`salesreward_sales::LedgerSnapshot`], never the
//! live catalog, and never mutates anything.

pub mod coerce;
pub mod detail;
pub mod report;
pub mod summary;

pub use coerce::{CoercedSale, coerce_snapshot, total_incentive};
pub use detail::{EmployeeProductDetail, detail_by_employee_product};
pub use report::{Report, ReportKind, ReportValue};
pub use summary::{EmployeeSummary, summary_by_employee};
