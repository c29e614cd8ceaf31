use std::collections::HashMap;
use std::sync::RwLock;

use super::{CollectionKind, Repository, Row, StoreError, Table};

/// In-memory store for tests/dev.
///
/// Saves go through the same normalization as a load from disk would.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<HashMap<CollectionKind, Vec<Row>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Repository for InMemoryStore {
    fn try_load(&self, kind: CollectionKind) -> Result<Table, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))?;
        Ok(match map.get(&kind) {
            Some(rows) => Table::normalized(kind, rows.iter().cloned()),
            None => Table::empty(kind),
        })
    }

    fn save(&self, table: &Table) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))?;
        map.insert(table.kind(), table.rows().to_vec());
        Ok(())
    }
}
