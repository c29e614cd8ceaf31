use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use salesreward_core::{Cell, DomainError, DomainResult, Incentive, require_key};

use crate::pricing::{PricedLine, PricingResolver};

/// What the entry form submits: who sold what, how many, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleEntry {
    pub date: NaiveDate,
    pub employee_name: String,
    pub product_name: String,
    pub quantity: i64,
}

impl SaleEntry {
    /// Validate the entry and price it against the current catalog.
    ///
    /// Structural problems (empty names, quantity < 1) are errors. Pricing
    /// problems are not: they fall back to a zero incentive, reported through
    /// [`PricedLine::fallback`].
    pub fn price(&self, resolver: &PricingResolver<'_>) -> DomainResult<(Sale, PricedLine)> {
        let quantity = u32::try_from(self.quantity)
            .ok()
            .filter(|q| *q >= 1)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "quantity must be at least 1 (got {})",
                    self.quantity
                ))
            })?;
        let product_name = require_key("product name", &self.product_name)?;
        let priced = resolver.resolve(product_name, quantity);
        let sale = Sale::new(
            self.date,
            &self.employee_name,
            product_name,
            quantity,
            priced.unit_incentive_at_sale,
        )?;
        Ok((sale, priced))
    }
}

/// A priced sale, ready to be appended to the ledger.
///
/// `total_incentive` is computed once here from the unit incentive captured at
/// entry time. Nothing ever recomputes it from the live catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    date: NaiveDate,
    employee_name: String,
    product_name: String,
    quantity: u32,
    unit_incentive_at_sale: Incentive,
    total_incentive: Incentive,
}

impl Sale {
    pub fn new(
        date: NaiveDate,
        employee_name: &str,
        product_name: &str,
        quantity: u32,
        unit_incentive_at_sale: Incentive,
    ) -> DomainResult<Self> {
        let employee_name = require_key("employee name", employee_name)?;
        let product_name = require_key("product name", product_name)?;
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be at least 1 (got 0)"));
        }
        let total_incentive = unit_incentive_at_sale.times(quantity)?;

        Ok(Self {
            date,
            employee_name: employee_name.to_string(),
            product_name: product_name.to_string(),
            quantity,
            unit_incentive_at_sale,
            total_incentive,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn employee_name(&self) -> &str {
        &self.employee_name
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_incentive_at_sale(&self) -> Incentive {
        self.unit_incentive_at_sale
    }

    pub fn total_incentive(&self) -> Incentive {
        self.total_incentive
    }
}

/// A ledger row in its persisted shape.
///
/// Rows written by this system always hold well-formed values, but the backing
/// store may have been edited by hand; every field is therefore kept as a raw
/// [`Cell`] and interpreted leniently by readers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub date: Cell,
    pub employee_name: Cell,
    pub product_name: Cell,
    pub quantity: Cell,
    pub unit_incentive_at_sale: Cell,
    pub total_incentive: Cell,
}

impl SaleRecord {
    /// Short human-readable description (date, employee, product, quantity).
    pub fn describe(&self) -> String {
        format!(
            "{} {} {} x{}",
            self.date.to_text(),
            self.employee_name.to_text(),
            self.product_name.to_text(),
            self.quantity.to_text()
        )
    }

    /// All fields blank: a spacer row left behind in the backing store.
    pub fn is_blank(&self) -> bool {
        [
            &self.date,
            &self.employee_name,
            &self.product_name,
            &self.quantity,
            &self.unit_incentive_at_sale,
            &self.total_incentive,
        ]
        .iter()
        .all(|c| c.is_blank())
    }
}

impl From<&Sale> for SaleRecord {
    fn from(sale: &Sale) -> Self {
        Self {
            date: Cell::text(sale.date.to_string()),
            employee_name: Cell::text(sale.employee_name.clone()),
            product_name: Cell::text(sale.product_name.clone()),
            quantity: Cell::integer(u64::from(sale.quantity)),
            unit_incentive_at_sale: Cell::decimal(sale.unit_incentive_at_sale.amount()),
            total_incentive: Cell::decimal(sale.total_incentive.amount()),
        }
    }
}

impl From<Sale> for SaleRecord {
    fn from(sale: Sale) -> Self {
        Self::from(&sale)
    }
}
