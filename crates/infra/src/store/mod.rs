//! Persistence collaborator.
//!
//! Collections are read and written whole. There is no row-level locking and
//! no transaction spanning a load and a save: when two callers interleave a
//! read-modify-write cycle, the last full overwrite wins.

pub mod in_memory;
pub mod json_file;
pub mod table;

use std::sync::Arc;

use thiserror::Error;

pub use in_memory::InMemoryStore;
pub use json_file::JsonFileStore;
pub use table::{CollectionKind, Row, Table};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode collection: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The backing resource exists but could not be read or parsed. It is left
    /// untouched.
    #[error("collection {collection} is unreadable: {reason}")]
    Unreadable {
        collection: CollectionKind,
        reason: String,
    },
}

/// Whole-collection storage.
///
/// A missing or empty backing resource is an empty table with the expected
/// columns. A resource that exists but cannot be read is an error from
/// [`try_load`](Repository::try_load), and read as empty by
/// [`load`](Repository::load). Anything that writes a collection back must
/// start from `try_load`, so an unreadable file is never overwritten.
pub trait Repository: Send + Sync {
    fn try_load(&self, kind: CollectionKind) -> Result<Table, StoreError>;

    fn save(&self, table: &Table) -> Result<(), StoreError>;

    /// Lenient read for views and reports.
    fn load(&self, kind: CollectionKind) -> Table {
        self.try_load(kind).unwrap_or_else(|e| {
            tracing::warn!(collection = %kind, error = %e, "treating unreadable collection as empty");
            Table::empty(kind)
        })
    }

    /// Add one row to the end of a collection, leaving existing rows as stored.
    fn append(&self, kind: CollectionKind, row: Row) -> Result<(), StoreError> {
        let mut table = self.try_load(kind)?;
        table.push(row);
        self.save(&table)
    }
}

impl<S> Repository for Arc<S>
where
    S: Repository + ?Sized,
{
    fn try_load(&self, kind: CollectionKind) -> Result<Table, StoreError> {
        (**self).try_load(kind)
    }

    fn save(&self, table: &Table) -> Result<(), StoreError> {
        (**self).save(table)
    }

    fn load(&self, kind: CollectionKind) -> Table {
        (**self).load(kind)
    }

    fn append(&self, kind: CollectionKind, row: Row) -> Result<(), StoreError> {
        (**self).append(kind, row)
    }
}
