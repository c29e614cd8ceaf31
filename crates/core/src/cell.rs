//! Loosely-typed scalar cells as they appear in persisted rows.
//!
//! Backing stores (flat files, spreadsheets) hand back whatever a human typed
//! into them. A `Cell` keeps that raw value and offers lenient numeric coercion;
//! callers decide whether a failed coercion is an error or a zero.

use core::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value as JsonValue};

/// A single persisted field value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell(JsonValue);

impl Cell {
    /// The blank cell used to fill columns missing from a row.
    pub fn blank() -> Self {
        Self(JsonValue::String(String::new()))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self(JsonValue::String(value.into()))
    }

    /// Store a decimal as a plain JSON number.
    ///
    /// Integral values become JSON integers; fractional values are written as
    /// floats. Values that fit neither are kept as text.
    pub fn decimal(value: Decimal) -> Self {
        Self(decimal_to_json(value))
    }

    pub fn integer(value: u64) -> Self {
        Self(JsonValue::from(value))
    }

    pub fn from_json(value: JsonValue) -> Self {
        Self(value)
    }

    pub fn as_json(&self) -> &JsonValue {
        &self.0
    }

    pub fn into_json(self) -> JsonValue {
        self.0
    }

    /// Null, or a string that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match &self.0 {
            JsonValue::Null => true,
            JsonValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Text rendering of the cell (`""` for null).
    pub fn to_text(&self) -> String {
        match &self.0 {
            JsonValue::Null => String::new(),
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Lenient numeric coercion.
    ///
    /// Accepts JSON numbers and numeric strings (surrounding whitespace allowed,
    /// scientific notation allowed). Anything else yields `None`.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match &self.0 {
            JsonValue::Number(n) => number_to_decimal(n),
            JsonValue::String(s) => parse_decimal(s),
            _ => None,
        }
    }

    /// Numeric coercion that also rejects negative values.
    pub fn to_non_negative_decimal(&self) -> Option<Decimal> {
        self.to_decimal()
            .filter(|d| !d.is_sign_negative() || d.is_zero())
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

impl From<Decimal> for Cell {
    fn from(value: Decimal) -> Self {
        Self::decimal(value)
    }
}

/// Render a decimal as a plain JSON number where possible.
pub fn decimal_to_json(value: Decimal) -> JsonValue {
    let value = value.normalize();
    if value.fract().is_zero() {
        if let Some(i) = value.to_i64() {
            return JsonValue::from(i);
        }
    }
    value
        .to_f64()
        .and_then(Number::from_f64)
        .map(JsonValue::Number)
        .unwrap_or_else(|| JsonValue::String(value.to_string()))
}

fn number_to_decimal(n: &Number) -> Option<Decimal> {
    if let Some(i) = n.as_i64() {
        return Some(Decimal::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(Decimal::from(u));
    }
    parse_decimal(&n.to_string())
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}
