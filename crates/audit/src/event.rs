use serde::{Deserialize, Serialize};

/// Kind of mutation that was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::Create => "create",
            AuditAction::Update => "update",
            AuditAction::Delete => "delete",
        }
    }
}

impl core::str::FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "create" => Ok(AuditAction::Create),
            "update" => Ok(AuditAction::Update),
            "delete" => Ok(AuditAction::Delete),
            other => Err(format!("unknown audit action '{other}'")),
        }
    }
}

/// Which collection the mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Product,
    Employee,
    Sale,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Product => "product",
            EntityKind::Employee => "employee",
            EntityKind::Sale => "sale",
        }
    }
}

impl core::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "product" => Ok(EntityKind::Product),
            "employee" => Ok(EntityKind::Employee),
            "sale" => Ok(EntityKind::Sale),
            other => Err(format!("unknown entity kind '{other}'")),
        }
    }
}

/// A fact describing one successful state change.
///
/// Domain operations return these; they carry no actor or timestamp. The
/// application layer stamps them into an [`AuditEntry`](crate::AuditEntry)
/// once the change has been persisted.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - designed to be **append-only**
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub entity: EntityKind,
    /// Human-readable description of the affected record.
    pub detail: String,
}

impl AuditEvent {
    pub fn new(action: AuditAction, entity: EntityKind, detail: impl Into<String>) -> Self {
        Self {
            action,
            entity,
            detail: detail.into(),
        }
    }

    pub fn created(entity: EntityKind, detail: impl Into<String>) -> Self {
        Self::new(AuditAction::Create, entity, detail)
    }

    pub fn updated(entity: EntityKind, detail: impl Into<String>) -> Self {
        Self::new(AuditAction::Update, entity, detail)
    }

    pub fn deleted(entity: EntityKind, detail: impl Into<String>) -> Self {
        Self::new(AuditAction::Delete, entity, detail)
    }

    /// Stable event name (e.g. "catalog.product.updated").
    pub fn event_type(&self) -> &'static str {
        match (self.entity, self.action) {
            (EntityKind::Product, AuditAction::Create) => "catalog.product.created",
            (EntityKind::Product, AuditAction::Update) => "catalog.product.updated",
            (EntityKind::Product, AuditAction::Delete) => "catalog.product.deleted",
            (EntityKind::Employee, AuditAction::Create) => "catalog.employee.created",
            (EntityKind::Employee, AuditAction::Update) => "catalog.employee.updated",
            (EntityKind::Employee, AuditAction::Delete) => "catalog.employee.deleted",
            (EntityKind::Sale, AuditAction::Create) => "sales.ledger.appended",
            (EntityKind::Sale, AuditAction::Update) => "sales.ledger.updated",
            (EntityKind::Sale, AuditAction::Delete) => "sales.ledger.deleted",
        }
    }
}
