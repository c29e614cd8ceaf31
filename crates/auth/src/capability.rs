use serde::{Deserialize, Serialize};

/// What a mutating operation needs from its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Append to the sales ledger through the entry workflow.
    RecordSales,
    /// Upsert or delete products and employees.
    EditCatalog,
    /// Remove sales from the ledger.
    DeleteSales,
}

impl Capability {
    pub fn as_str(self) -> &'static str {
        match self {
            Capability::RecordSales => "sales.record",
            Capability::EditCatalog => "catalog.edit",
            Capability::DeleteSales => "sales.delete",
        }
    }

    /// Whether the editor flag is required.
    pub fn requires_editor(self) -> bool {
        !matches!(self, Capability::RecordSales)
    }
}

impl core::fmt::Display for Capability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
