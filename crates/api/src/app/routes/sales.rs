use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};

use salesreward_auth::ActorContext;
use salesreward_sales::SaleEntry;

use crate::app::services::{AppServices, run_blocking};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_sales).post(record_sale))
        .route("/entry-options", get(entry_options))
        .route("/recent", get(recent_sales))
        .route("/:position", delete(delete_sale))
}

pub async fn entry_options(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match run_blocking(services, |s| s.incentives.entry_options()).await {
        Ok(options) => Json(options).into_response(),
        Err(resp) => resp,
    }
}

pub async fn record_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    body: Result<Json<dto::RecordSaleRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let entry = SaleEntry::from(body);

    let result = run_blocking(services, move |s| s.incentives.record_sale(&actor, &entry)).await;
    match result {
        Ok(Ok(recorded)) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "sale": dto::SaleResponse::new(recorded.position, &recorded.record),
                "pricing_fallback": recorded.fallback,
            })),
        )
            .into_response(),
        Ok(Err(e)) => errors::service_error_to_response(e),
        Err(resp) => resp,
    }
}

/// Full ledger in ledger order, each row tagged with its position.
pub async fn list_sales(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let snapshot = match run_blocking(services, |s| s.incentives.ledger_snapshot()).await {
        Ok(snapshot) => snapshot,
        Err(resp) => return resp,
    };
    let rows: Vec<dto::SaleResponse> = snapshot
        .iter()
        .enumerate()
        .map(|(position, record)| dto::SaleResponse::new(position, record))
        .collect();
    Json(rows).into_response()
}

/// Most recent sales, newest first.
pub async fn recent_sales(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::RecentSalesQuery>,
) -> axum::response::Response {
    let limit = query.limit.unwrap_or(services.recent_sales);
    let recent = match run_blocking(services, move |s| s.incentives.recent_sales(limit)).await {
        Ok(recent) => recent,
        Err(resp) => return resp,
    };
    let rows: Vec<dto::SaleResponse> = recent
        .iter()
        .rev()
        .map(|(position, record)| dto::SaleResponse::new(*position, record))
        .collect();
    Json(rows).into_response()
}

pub async fn delete_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Path(position): Path<String>,
) -> axum::response::Response {
    let position: i64 = match position.trim().parse() {
        Ok(p) => p,
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "validation_error",
                format!("position must be an integer (got {position:?})"),
            );
        }
    };

    let result = run_blocking(services, move |s| s.incentives.delete_sale(&actor, position)).await;
    match result {
        Ok(Ok(removed)) => Json(serde_json::json!({
            "deleted": dto::SaleResponse::new(usize::try_from(position).unwrap_or_default(), &removed),
        }))
        .into_response(),
        Ok(Err(e)) => errors::service_error_to_response(e),
        Err(resp) => resp,
    }
}
