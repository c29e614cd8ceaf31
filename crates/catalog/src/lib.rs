//! Catalog Store: the product and employee registries.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns. Every
//! successful mutation returns the [`AuditEvent`](salesreward_audit::AuditEvent)
//! describing it; no-ops return nothing.

pub mod employee;
pub mod product;

pub use employee::{Employee, EmployeeRoster};
pub use product::{Product, ProductCatalog};
