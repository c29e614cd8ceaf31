use std::sync::Arc;

use axum::{Json, Router, extract::Extension, response::IntoResponse, routing::get};

use crate::app::dto;
use crate::app::services::{AppServices, run_blocking};

pub fn router() -> Router {
    Router::new().route("/", get(list_audit_entries))
}

/// Whole audit log, in append order.
pub async fn list_audit_entries(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match run_blocking(services, |s| s.incentives.audit_entries()).await {
        Ok(log) => {
            let entries: Vec<dto::AuditEntryResponse> = log.iter().map(Into::into).collect();
            Json(entries).into_response()
        }
        Err(resp) => resp,
    }
}
