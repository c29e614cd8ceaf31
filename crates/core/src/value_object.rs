//! Value objects: equality by value, not identity.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A non-negative incentive amount (per unit, or a line total).
///
/// Immutable and compared by value: two incentives of `10` are the same
/// incentive, whichever product they were read from.
///
/// Arithmetic is exact decimal arithmetic; no float rounding is involved in
/// `unit * quantity`.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Incentive(Decimal);

impl Incentive {
    pub const ZERO: Incentive = Incentive(Decimal::ZERO);

    /// Wrap a decimal amount, rejecting negatives.
    pub fn new(amount: Decimal) -> DomainResult<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::validation(format!(
                "incentive must be non-negative (got {amount})"
            )));
        }
        Ok(Self(amount.normalize()))
    }

    /// Strictly parse user-supplied input (e.g. a form field).
    ///
    /// Non-numeric or negative input is a validation error; this is the gate that
    /// keeps malformed numbers out of the catalog.
    pub fn parse_input(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        let amount = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| {
                DomainError::validation(format!("incentive must be numeric (got {raw:?})"))
            })?;
        Self::new(amount)
    }

    pub fn amount(self) -> Decimal {
        self.0
    }

    /// Line total for `quantity` units at this unit incentive.
    pub fn times(self, quantity: u32) -> DomainResult<Incentive> {
        self.0
            .checked_mul(Decimal::from(quantity))
            .map(|total| Self(total.normalize()))
            .ok_or_else(|| DomainError::validation("incentive total overflows"))
    }
}

impl core::fmt::Display for Incentive {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<Decimal> for Incentive {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Incentive> for Decimal {
    fn from(value: Incentive) -> Self {
        value.0
    }
}
