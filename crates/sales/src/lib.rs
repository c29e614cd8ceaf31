//! Sales ledger domain module.
//!
//! This crate contains the rules for pricing a sale at entry time and for
//! mutating the ledger, implemented purely as deterministic domain logic
//! (no IO, no HTTP, no storage).

pub mod ledger;
pub mod pricing;
pub mod sale;

pub use ledger::{Ledger, LedgerSnapshot};
pub use pricing::{PricedLine, PricingFallback, PricingResolver};
pub use sale::{Sale, SaleEntry, SaleRecord};
