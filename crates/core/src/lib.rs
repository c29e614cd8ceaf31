//! `salesreward-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod cell;
pub mod error;
pub mod id;
pub mod value_object;

pub use cell::Cell;
pub use error::{DomainError, DomainResult, checked_sum, require_key};
pub use id::AuditEntryId;
pub use value_object::Incentive;

pub use rust_decimal::Decimal;
