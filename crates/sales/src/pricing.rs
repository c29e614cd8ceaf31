//! Price-at-time-of-sale resolution.
//!
//! The resolver never fails a sale. An unknown product, or a stored incentive
//! that is not a non-negative number, prices the sale at zero and reports why
//! in [`PricedLine::fallback`]. Callers are expected to surface that reason
//! (the service layer logs it); entries are never blocked on pricing.

use serde::{Deserialize, Serialize};

use salesreward_catalog::ProductCatalog;
use salesreward_core::Incentive;

/// Why a sale was priced at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingFallback {
    /// The product is not in the catalog.
    UnknownProduct,
    /// The catalog holds a value that does not coerce to a non-negative number.
    UnreadableIncentive,
}

/// Result of pricing one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedLine {
    pub unit_incentive_at_sale: Incentive,
    pub total_incentive: Incentive,
    pub fallback: Option<PricingFallback>,
}

impl PricedLine {
    fn zero(reason: PricingFallback) -> Self {
        Self {
            unit_incentive_at_sale: Incentive::ZERO,
            total_incentive: Incentive::ZERO,
            fallback: Some(reason),
        }
    }
}

/// Resolves unit incentives against a catalog snapshot.
#[derive(Debug, Clone, Copy)]
pub struct PricingResolver<'a> {
    catalog: &'a ProductCatalog,
}

impl<'a> PricingResolver<'a> {
    pub fn new(catalog: &'a ProductCatalog) -> Self {
        Self { catalog }
    }

    pub fn resolve(&self, product_name: &str, quantity: u32) -> PricedLine {
        let Some(product) = self.catalog.get(product_name.trim()) else {
            return PricedLine::zero(PricingFallback::UnknownProduct);
        };
        let Some(unit) = product.unit_incentive() else {
            return PricedLine::zero(PricingFallback::UnreadableIncentive);
        };
        match unit.times(quantity) {
            Ok(total) => PricedLine {
                unit_incentive_at_sale: unit,
                total_incentive: total,
                fallback: None,
            },
            Err(_) => PricedLine::zero(PricingFallback::UnreadableIncentive),
        }
    }
}
