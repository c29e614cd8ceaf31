use serde::{Deserialize, Serialize};

use salesreward_audit::{AuditEvent, EntityKind};
use salesreward_core::{DomainResult, require_key};

/// An employee who can be credited with sales.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Employee {
    name: String,
}

impl Employee {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Employee registry keyed on name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeRoster {
    employees: Vec<Employee>,
}

impl EmployeeRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted employees, dropping blank and repeated names.
    pub fn from_employees(employees: impl IntoIterator<Item = Employee>) -> Self {
        let mut roster = Self::new();
        for employee in employees {
            let name = employee.name.trim();
            if name.is_empty() || roster.contains(name) {
                continue;
            }
            roster.employees.push(Employee::new(name));
        }
        roster
    }

    /// Add `name` to the roster.
    ///
    /// Inserting a name that is already present is a no-op (`Ok(None)`), not an
    /// error. An empty name fails validation.
    pub fn insert(&mut self, name: &str) -> DomainResult<Option<AuditEvent>> {
        let name = require_key("employee name", name)?;
        if self.contains(name) {
            return Ok(None);
        }
        self.employees.push(Employee::new(name));
        Ok(Some(AuditEvent::created(EntityKind::Employee, name)))
    }

    /// Remove `name` if present. Absent names are a no-op (`None`).
    pub fn delete(&mut self, name: &str) -> Option<AuditEvent> {
        let name = name.trim();
        let idx = self.employees.iter().position(|e| e.name == name)?;
        let removed = self.employees.remove(idx);
        Some(AuditEvent::deleted(EntityKind::Employee, removed.name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.employees.iter().any(|e| e.name == name)
    }

    /// Employees in insertion order. Call again to restart.
    pub fn iter(&self) -> std::slice::Iter<'_, Employee> {
        self.employees.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.employees.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

impl<'a> IntoIterator for &'a EmployeeRoster {
    type Item = &'a Employee;
    type IntoIter = std::slice::Iter<'a, Employee>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
