//! Domain error model.

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// addressing, capability). Storage and transport concerns belong elsewhere.
///
/// A domain operation that returns an error has not mutated any state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (empty key, malformed numeric input, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A positional address fell outside `[0, len)`.
    #[error("position {position} is out of range (ledger holds {len} records)")]
    OutOfRange { position: i64, len: usize },

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The caller lacks the capability required for a mutation.
    #[error("unauthorized")]
    Unauthorized,

    /// A decimal sum exceeded the representable range.
    #[error("{0} overflowed")]
    Overflow(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn out_of_range(position: i64, len: usize) -> Self {
        Self::OutOfRange { position, len }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn overflow(what: impl Into<String>) -> Self {
        Self::Overflow(what.into())
    }
}

/// `a + b`, or [`DomainError::Overflow`] naming `what` was being summed.
pub fn checked_sum(a: Decimal, b: Decimal, what: &str) -> DomainResult<Decimal> {
    a.checked_add(b).ok_or_else(|| DomainError::overflow(what))
}

/// Reject empty (or whitespace-only) keys.
///
/// Returns the trimmed key on success.
pub fn require_key<'a>(field: &str, value: &'a str) -> DomainResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} must not be empty")));
    }
    Ok(trimmed)
}
