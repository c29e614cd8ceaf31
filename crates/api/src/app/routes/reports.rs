use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};

use salesreward_infra::ExportFormat;
use salesreward_reports::ReportKind;

use crate::app::services::{AppServices, run_blocking};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/summary", get(summary))
        .route("/detail", get(detail))
        .route("/log", get(log))
        .route("/:name/export", get(export_report))
}

async fn report(services: Arc<AppServices>, kind: ReportKind) -> axum::response::Response {
    match run_blocking(services, move |s| s.incentives.report(kind)).await {
        Ok(Ok(report)) => Json(report).into_response(),
        Ok(Err(e)) => errors::service_error_to_response(e),
        Err(resp) => resp,
    }
}

pub async fn summary(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    report(services, ReportKind::SalesSummary).await
}

pub async fn detail(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    report(services, ReportKind::EmployeeProductDetail).await
}

pub async fn log(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    report(services, ReportKind::SalesDetailLog).await
}

pub async fn export_report(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
    Query(query): Query<dto::ExportQuery>,
) -> axum::response::Response {
    let kind: ReportKind = match name.parse() {
        Ok(k) => k,
        Err(msg) => return errors::json_error(StatusCode::NOT_FOUND, "unknown_report", msg),
    };
    let format = match query.format.as_deref().map(str::parse::<ExportFormat>) {
        None => ExportFormat::default(),
        Some(Ok(f)) => f,
        Some(Err(e)) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string());
        }
    };

    let result = run_blocking(services, move |s| s.incentives.export_report(kind, format)).await;
    match result {
        Ok(Ok(exported)) => (
            [
                (header::CONTENT_TYPE, exported.content_type.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", exported.file_name),
                ),
            ],
            exported.bytes,
        )
            .into_response(),
        Ok(Err(e)) => errors::service_error_to_response(e),
        Err(resp) => resp,
    }
}
