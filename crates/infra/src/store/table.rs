use core::fmt;
use core::str::FromStr;

use serde_json::{Map, Value as JsonValue};

/// A persisted row: field name -> raw value.
pub type Row = Map<String, JsonValue>;

/// The four persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Products,
    Employees,
    Sales,
    AuditLog,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 4] = [
        CollectionKind::Products,
        CollectionKind::Employees,
        CollectionKind::Sales,
        CollectionKind::AuditLog,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CollectionKind::Products => "products",
            CollectionKind::Employees => "employees",
            CollectionKind::Sales => "sales",
            CollectionKind::AuditLog => "audit_log",
        }
    }

    /// Expected field list, in display order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            CollectionKind::Products => &["name", "unit_incentive"],
            CollectionKind::Employees => &["name"],
            CollectionKind::Sales => &[
                "date",
                "employee_name",
                "product_name",
                "quantity",
                "unit_incentive_at_sale",
                "total_incentive",
            ],
            CollectionKind::AuditLog => &["id", "timestamp", "actor", "action", "entity", "detail"],
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CollectionKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown collection: {s}"))
    }
}

/// A whole collection as loaded from, or written to, a store.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    kind: CollectionKind,
    rows: Vec<Row>,
}

impl Table {
    pub fn empty(kind: CollectionKind) -> Self {
        Self {
            kind,
            rows: Vec::new(),
        }
    }

    /// Normalize raw rows: fill missing expected columns with `""` and drop
    /// rows where every value is blank.
    pub fn normalized(kind: CollectionKind, rows: impl IntoIterator<Item = Row>) -> Self {
        let rows = rows
            .into_iter()
            .filter(|row| !row_is_blank(row))
            .map(|mut row| {
                for column in kind.columns() {
                    row.entry(*column)
                        .or_insert_with(|| JsonValue::String(String::new()));
                }
                row
            })
            .collect();
        Self { kind, rows }
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    pub fn columns(&self) -> &'static [&'static str] {
        self.kind.columns()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn row_is_blank(row: &Row) -> bool {
    row.values().all(|v| match v {
        JsonValue::Null => true,
        JsonValue::String(s) => s.trim().is_empty(),
        _ => false,
    })
}
