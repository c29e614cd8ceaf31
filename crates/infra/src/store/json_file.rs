//! One JSON file per collection (`<data_dir>/<kind>.json`, an array of objects).

use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;

use super::{CollectionKind, Repository, StoreError, Table};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, kind: CollectionKind) -> PathBuf {
        self.data_dir.join(format!("{}.json", kind.as_str()))
    }
}

impl Repository for JsonFileStore {
    fn try_load(&self, kind: CollectionKind) -> Result<Table, StoreError> {
        let path = self.path_for(kind);
        let unreadable = |reason: String| {
            tracing::warn!(collection = %kind, path = %path.display(), %reason, "unreadable collection file");
            StoreError::Unreadable {
                collection: kind,
                reason,
            }
        };

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Table::empty(kind)),
            Err(e) => return Err(unreadable(e.to_string())),
        };
        if raw.trim().is_empty() {
            return Ok(Table::empty(kind));
        }

        match serde_json::from_str::<JsonValue>(&raw) {
            Ok(JsonValue::Array(items)) => {
                let rows = items.into_iter().filter_map(|item| match item {
                    JsonValue::Object(row) => Some(row),
                    _ => None,
                });
                Ok(Table::normalized(kind, rows))
            }
            Ok(_) => Err(unreadable("not a JSON array".to_string())),
            Err(e) => Err(unreadable(e.to_string())),
        }
    }

    /// Write to a temp file in the data dir, then rename it over the target.
    fn save(&self, table: &Table) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir)?;
        let target = self.path_for(table.kind());

        let tmp = tempfile::NamedTempFile::new_in(&self.data_dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer_pretty(&mut writer, table.rows())?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&target).map_err(|e| StoreError::Io(e.error))?;

        tracing::debug!(collection = %table.kind(), rows = table.len(), "collection saved");
        Ok(())
    }
}
