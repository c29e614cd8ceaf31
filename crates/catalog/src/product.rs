use serde::{Deserialize, Serialize};

use salesreward_audit::{AuditEvent, EntityKind};
use salesreward_core::{Cell, DomainResult, Incentive, require_key};

/// A product and the incentive paid per unit sold.
///
/// The incentive is kept as the raw persisted [`Cell`]: a backing spreadsheet
/// may hold anything in that column, and it is the pricing resolver's job to
/// decide what an unreadable value means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    name: String,
    unit_incentive: Cell,
}

impl Product {
    pub fn new(name: impl Into<String>, unit_incentive: Incentive) -> Self {
        Self {
            name: name.into(),
            unit_incentive: Cell::decimal(unit_incentive.amount()),
        }
    }

    /// Rebuild a product from a persisted row without interpreting its value.
    pub fn from_raw(name: impl Into<String>, unit_incentive: Cell) -> Self {
        Self {
            name: name.into(),
            unit_incentive,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn raw_unit_incentive(&self) -> &Cell {
        &self.unit_incentive
    }

    /// The stored incentive, if it coerces to a non-negative number.
    pub fn unit_incentive(&self) -> Option<Incentive> {
        self.unit_incentive
            .to_non_negative_decimal()
            .and_then(|d| Incentive::new(d).ok())
    }
}

/// Product registry: one entry per distinct name, in insertion order.
///
/// No price history is kept here; sales capture their own copy of the price.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted products.
    ///
    /// Rows with a blank name are skipped. When a name repeats, the first
    /// occurrence wins, which is also the row a lookup would have found.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        let mut catalog = Self::new();
        for product in products {
            let name = product.name.trim();
            if name.is_empty() || catalog.get(name).is_some() {
                continue;
            }
            catalog.products.push(Product {
                name: name.to_string(),
                unit_incentive: product.unit_incentive,
            });
        }
        catalog
    }

    /// Insert `name`, or replace its incentive if it already exists.
    ///
    /// Fails (without mutating) when `name` is empty.
    pub fn upsert(&mut self, name: &str, unit_incentive: Incentive) -> DomainResult<AuditEvent> {
        let name = require_key("product name", name)?;

        if let Some(existing) = self.products.iter_mut().find(|p| p.name == name) {
            let previous = existing.unit_incentive.to_text();
            existing.unit_incentive = Cell::decimal(unit_incentive.amount());
            return Ok(AuditEvent::updated(
                EntityKind::Product,
                format!("{name}: unit incentive {previous} -> {unit_incentive}"),
            ));
        }

        self.products.push(Product::new(name, unit_incentive));
        Ok(AuditEvent::created(
            EntityKind::Product,
            format!("{name}: unit incentive {unit_incentive}"),
        ))
    }

    /// Remove `name` if present. Absent names are a no-op (`None`).
    pub fn delete(&mut self, name: &str) -> Option<AuditEvent> {
        let name = name.trim();
        let idx = self.products.iter().position(|p| p.name == name)?;
        let removed = self.products.remove(idx);
        Some(AuditEvent::deleted(
            EntityKind::Product,
            format!(
                "{}: unit incentive {}",
                removed.name,
                removed.unit_incentive.to_text()
            ),
        ))
    }

    pub fn get(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    /// Products in insertion order. Call again to restart.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.products.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl<'a> IntoIterator for &'a ProductCatalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use salesreward_audit::AuditAction;
    use salesreward_core::{Decimal, DomainError};

    fn incentive(v: i64) -> Incentive {
        Incentive::new(Decimal::from(v)).unwrap()
    }

    #[test]
    fn upsert_inserts_then_updates_in_place() {
        let mut catalog = ProductCatalog::new();

        let created = catalog.upsert("Widget", incentive(10)).unwrap();
        assert_eq!(created.action, AuditAction::Create);

        catalog.upsert("Gadget", incentive(4)).unwrap();
        let updated = catalog.upsert("Widget", incentive(15)).unwrap();
        assert_eq!(updated.action, AuditAction::Update);
        assert_eq!(updated.detail, "Widget: unit incentive 10 -> 15");

        let names: Vec<_> = catalog.names().collect();
        assert_eq!(names, vec!["Widget", "Gadget"]);
        assert_eq!(
            catalog.get("Widget").unwrap().unit_incentive(),
            Some(incentive(15))
        );
    }

    #[test]
    fn empty_name_is_rejected_without_mutation() {
        let mut catalog = ProductCatalog::new();
        let err = catalog.upsert("  ", incentive(1)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(catalog.is_empty());
    }

    #[test]
    fn deleting_absent_product_is_a_noop() {
        let mut catalog = ProductCatalog::new();
        catalog.upsert("Widget", incentive(10)).unwrap();

        assert_eq!(catalog.delete("Nope"), None);
        assert_eq!(catalog.len(), 1);

        let event = catalog.delete("Widget").unwrap();
        assert_eq!(event.action, AuditAction::Delete);
        assert!(catalog.is_empty());
    }

    #[test]
    fn unreadable_stored_incentive_coerces_to_none() {
        let product = Product::from_raw("Widget", Cell::text("ten"));
        assert_eq!(product.unit_incentive(), None);

        let negative = Product::from_raw("Widget", Cell::from_json(serde_json::json!(-3)));
        assert_eq!(negative.unit_incentive(), None);

        let textual = Product::from_raw("Widget", Cell::text("12"));
        assert_eq!(textual.unit_incentive(), Some(incentive(12)));
    }

    #[test]
    fn from_products_keeps_first_of_duplicates_and_skips_blank_names() {
        let catalog = ProductCatalog::from_products(vec![
            Product::new("Widget", incentive(10)),
            Product::new(" ", incentive(1)),
            Product::new("Widget", incentive(99)),
            Product::new("Gadget", incentive(2)),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.get("Widget").unwrap().unit_incentive(),
            Some(incentive(10))
        );
    }

    #[test]
    fn iteration_is_restartable() {
        let mut catalog = ProductCatalog::new();
        catalog.upsert("A", incentive(1)).unwrap();
        catalog.upsert("B", incentive(2)).unwrap();

        let listing = catalog.iter();
        let first: Vec<_> = listing.clone().map(|p| p.name().to_string()).collect();
        let second: Vec<_> = listing.map(|p| p.name().to_string()).collect();
        assert_eq!(first, second);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: after any sequence of upserts the catalog holds exactly one
        /// entry per distinct name, carrying the value of the latest upsert.
        #[test]
        fn upserts_keep_one_entry_per_name_with_latest_value(
            ops in prop::collection::vec((0usize..5, 0i64..1_000), 0..40)
        ) {
            let names = ["A", "B", "C", "D", "E"];
            let mut catalog = ProductCatalog::new();
            let mut expected: std::collections::HashMap<&str, i64> = Default::default();

            for (idx, value) in &ops {
                catalog.upsert(names[*idx], incentive(*value)).unwrap();
                expected.insert(names[*idx], *value);
            }

            prop_assert_eq!(catalog.len(), expected.len());
            for (name, value) in expected {
                prop_assert_eq!(
                    catalog.get(name).and_then(|p| p.unit_incentive()),
                    Some(incentive(value))
                );
            }
        }
    }
}
