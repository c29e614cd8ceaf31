use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};

use salesreward_auth::ActorContext;

use crate::app::services::{AppServices, run_blocking};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route("/:name", delete(delete_employee))
}

pub async fn list_employees(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match run_blocking(services, |s| s.incentives.list_employees()).await {
        Ok(roster) => {
            let names: Vec<&str> = roster.names().collect();
            Json(serde_json::json!(names)).into_response()
        }
        Err(resp) => resp,
    }
}

pub async fn create_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    body: Result<Json<dto::CreateEmployeeRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let name = body.name.trim().to_string();
    let result = run_blocking(services, move |s| {
        s.incentives.upsert_employee(&actor, &body.name)
    })
    .await;
    match result {
        // A duplicate name is a no-op, reported as 200 rather than 201.
        Ok(Ok(created)) => {
            let status = if created { StatusCode::CREATED } else { StatusCode::OK };
            (
                status,
                Json(serde_json::json!({ "name": name, "created": created })),
            )
                .into_response()
        }
        Ok(Err(e)) => errors::service_error_to_response(e),
        Err(resp) => resp,
    }
}

pub async fn delete_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(actor): Extension<ActorContext>,
    Path(name): Path<String>,
) -> axum::response::Response {
    let target = name.clone();
    let result = run_blocking(services, move |s| s.incentives.delete_employee(&actor, &target)).await;
    match result {
        Ok(Ok(deleted)) => {
            Json(serde_json::json!({ "name": name, "deleted": deleted })).into_response()
        }
        Ok(Err(e)) => errors::service_error_to_response(e),
        Err(resp) => resp,
    }
}
