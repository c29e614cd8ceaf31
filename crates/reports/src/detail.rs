use std::collections::BTreeMap;

use salesreward_core::{Decimal, DomainResult, checked_sum};

use crate::coerce::CoercedSale;

/// One row of the detail-by-employee-product view.
///
/// The unit incentive is part of the key: the same product sold at two
/// historical prices yields two rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeProductDetail {
    pub employee_name: String,
    pub product_name: String,
    pub unit_incentive_at_sale: Decimal,
    pub quantity: Decimal,
    pub total_incentive: Decimal,
}

type GroupKey<'a> = (&'a str, &'a str, Decimal);

/// Group by (employee, product, unit incentive), summing quantity and total.
///
/// Sorted by employee name ascending, then total incentive descending. Ties
/// fall back to product name and unit incentive so the order is stable.
pub fn detail_by_employee_product(
    rows: &[CoercedSale],
) -> DomainResult<Vec<EmployeeProductDetail>> {
    let mut groups: BTreeMap<GroupKey<'_>, (Decimal, Decimal)> = BTreeMap::new();
    for row in rows {
        let key = (
            row.employee_name.as_str(),
            row.product_name.as_str(),
            row.unit_incentive_at_sale.normalize(),
        );
        let (quantity, total) = groups.entry(key).or_default();
        *quantity = checked_sum(*quantity, row.quantity, "quantity")?;
        *total = checked_sum(*total, row.total_incentive, "total_incentive")?;
    }

    let mut detail: Vec<EmployeeProductDetail> = groups
        .into_iter()
        .map(
            |((employee, product, unit), (quantity, total_incentive))| EmployeeProductDetail {
                employee_name: employee.to_string(),
                product_name: product.to_string(),
                unit_incentive_at_sale: unit,
                quantity,
                total_incentive,
            },
        )
        .collect();

    detail.sort_by(|a, b| {
        a.employee_name
            .cmp(&b.employee_name)
            .then_with(|| b.total_incentive.cmp(&a.total_incentive))
            .then_with(|| a.product_name.cmp(&b.product_name))
            .then_with(|| a.unit_incentive_at_sale.cmp(&b.unit_incentive_at_sale))
    });
    Ok(detail)
}
