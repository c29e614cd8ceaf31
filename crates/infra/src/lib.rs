//! Infrastructure layer: storage backends, row codecs, export encoding,
//! configuration, and the service that orchestrates domain mutations.

pub mod codec;
pub mod config;
pub mod export;
pub mod service;
pub mod store;


pub use config::{AppConfig, ConfigError, StorageBackend};
pub use export::{ExportError, ExportFormat, ExportedReport};
pub use service::{EntryOptions, EntryReadiness, IncentiveService, RecordedSale, ServiceError};
pub use store::{CollectionKind, InMemoryStore, JsonFileStore, Repository, StoreError, Table};
