use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};

use salesreward_auth::ActorContext;

use crate::app::services::{AppServices, run_blocking};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products))
        .route("/:name", put(upsert_product).delete(delete_product))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match run_blocking(services, |s| s.incentives.list_products()).await {
        Ok(catalog) => {
            let items: Vec<dto::ProductResponse> = catalog.iter().map(Into::into).collect();
            Json(items).into_response()
        }
        Err(resp) => resp,
    }
}

pub async fn upsert_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Path(name): Path<String>,
    body: Result<Json<dto::UpsertProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let unit_incentive = match body.incentive() {
        Ok(v) => v,
        Err(e) => return errors::service_error_to_response(e.into()),
    };

    let result = run_blocking(services, move |s| {
        s.incentives.upsert_product(&actor, &name, unit_incentive)
    })
    .await;
    match result {
        Ok(Ok(product)) => Json(dto::ProductResponse::from(&product)).into_response(),
        Ok(Err(e)) => errors::service_error_to_response(e),
        Err(resp) => resp,
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Path(name): Path<String>,
) -> axum::response::Response {
    let target = name.clone();
    let result = run_blocking(services, move |s| s.incentives.delete_product(&actor, &target)).await;
    match result {
        Ok(Ok(deleted)) => (
            StatusCode::OK,
            Json(serde_json::json!({ "name": name, "deleted": deleted })),
        )
            .into_response(),
        Ok(Err(e)) => errors::service_error_to_response(e),
        Err(resp) => resp,
    }
}
