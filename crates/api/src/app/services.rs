use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;

use salesreward_infra::{
    AppConfig, InMemoryStore, IncentiveService, JsonFileStore, Repository, StorageBackend,
};

use crate::app::errors;

pub type SharedRepository = Arc<dyn Repository>;

/// Everything the handlers need, shared behind an `Arc`.
pub struct AppServices {
    pub incentives: IncentiveService<SharedRepository>,
    /// Default size of the "most recent N" sales view.
    pub recent_sales: usize,
}

impl AppServices {
    pub fn new(repo: SharedRepository, recent_sales: usize) -> Self {
        Self {
            incentives: IncentiveService::new(repo),
            recent_sales,
        }
    }

    /// In-memory backend (tests/dev).
    pub fn in_memory(recent_sales: usize) -> Self {
        Self::new(Arc::new(InMemoryStore::new()), recent_sales)
    }
}

pub fn build_services(config: &AppConfig) -> AppServices {
    let repo: SharedRepository = match config.storage {
        StorageBackend::Memory => {
            tracing::info!("using in-memory storage; data is lost on exit");
            Arc::new(InMemoryStore::new())
        }
        StorageBackend::JsonFile => {
            tracing::info!(data_dir = %config.data_dir.display(), "using JSON-file storage");
            Arc::new(JsonFileStore::new(config.data_dir.clone()))
        }
    };
    AppServices::new(repo, config.recent_sales)
}

/// Run a synchronous service call on tokio's blocking pool.
///
/// Every service call reads or writes whole collection files, so handlers
/// never call the service directly on a worker thread.
pub async fn run_blocking<T, F>(services: Arc<AppServices>, f: F) -> Result<T, Response>
where
    F: FnOnce(&AppServices) -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&services))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "blocking service call did not complete");
            errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "service call did not complete",
            )
        })
}
