use std::collections::BTreeMap;

use salesreward_core::{Decimal, DomainResult, checked_sum};

use crate::coerce::CoercedSale;

/// One row of the summary-by-employee view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeSummary {
    pub employee_name: String,
    pub quantity: Decimal,
    pub total_incentive: Decimal,
}

/// Group by employee, summing quantity and total incentive.
///
/// Sorted by total incentive descending, then employee name ascending. Fails
/// with [`DomainError::Overflow`](salesreward_core::DomainError::Overflow) when
/// a group's sum leaves the decimal range.
pub fn summary_by_employee(rows: &[CoercedSale]) -> DomainResult<Vec<EmployeeSummary>> {
    let mut groups: BTreeMap<&str, (Decimal, Decimal)> = BTreeMap::new();
    for row in rows {
        let (quantity, total) = groups.entry(row.employee_name.as_str()).or_default();
        *quantity = checked_sum(*quantity, row.quantity, "quantity")?;
        *total = checked_sum(*total, row.total_incentive, "total_incentive")?;
    }

    let mut summary: Vec<EmployeeSummary> = groups
        .into_iter()
        .map(|(name, (quantity, total_incentive))| EmployeeSummary {
            employee_name: name.to_string(),
            quantity,
            total_incentive,
        })
        .collect();

    summary.sort_by(|a, b| {
        b.total_incentive
            .cmp(&a.total_incentive)
            .then_with(|| a.employee_name.cmp(&b.employee_name))
    });
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::total_incentive;
    use salesreward_core::DomainError;
    use proptest::prelude::*;

    fn row(employee: &str, quantity: i64, total: i64) -> CoercedSale {
        CoercedSale {
            date: "2024-01-02".to_string(),
            employee_name: employee.to_string(),
            product_name: "Widget".to_string(),
            quantity: Decimal::from(quantity),
            unit_incentive_at_sale: Decimal::ZERO,
            total_incentive: Decimal::from(total),
        }
    }

    #[test]
    fn sums_per_employee() {
        let summary = summary_by_employee(&[row("Alice", 3, 30)]).unwrap();
        assert_eq!(
            summary,
            vec![EmployeeSummary {
                employee_name: "Alice".to_string(),
                quantity: Decimal::from(3),
                total_incentive: Decimal::from(30),
            }]
        );
    }

    #[test]
    fn sorted_by_total_desc_then_name() {
        let summary = summary_by_employee(&[
            row("Carol", 1, 10),
            row("Bob", 2, 50),
            row("Alice", 1, 10),
            row("Carol", 1, 0),
        ])
        .unwrap();
        let names: Vec<_> = summary.iter().map(|s| s.employee_name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Alice", "Carol"]);
        assert_eq!(summary[2].quantity, Decimal::from(2));
    }

    #[test]
    fn empty_input_gives_empty_summary() {
        assert!(summary_by_employee(&[]).unwrap().is_empty());
    }

    #[test]
    fn totals_beyond_decimal_range_are_an_error() {
        let mut near_max = row("Alice", 1, 0);
        near_max.total_incentive = "79228162514264337593543950335".parse().unwrap();

        assert_eq!(
            summary_by_employee(&[near_max.clone(), near_max.clone()]),
            Err(DomainError::Overflow("total_incentive".to_string()))
        );
        // Different employees never share an accumulator.
        let mut bob = near_max.clone();
        bob.employee_name = "Bob".to_string();
        assert_eq!(summary_by_employee(&[near_max, bob]).unwrap().len(), 2);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the summary total equals the raw ledger total.
        #[test]
        fn summary_total_matches_ledger_total(
            rows in prop::collection::vec(("[A-D]", 0i64..50, 0i64..10_000), 0..40)
        ) {
            let rows: Vec<_> = rows.iter().map(|(e, q, t)| row(e, *q, *t)).collect();
            let summary = summary_by_employee(&rows).unwrap();
            let summed: Decimal = summary.iter().map(|s| s.total_incentive).sum();
            prop_assert_eq!(summed, total_incentive(&rows).unwrap());
        }
    }
}
