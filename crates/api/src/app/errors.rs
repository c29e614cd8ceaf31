use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use salesreward_infra::ServiceError;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        e @ ServiceError::OutOfRange { .. } => {
            json_error(StatusCode::NOT_FOUND, "out_of_range", e.to_string())
        }
        ServiceError::Unauthorized(msg) => json_error(StatusCode::FORBIDDEN, "unauthorized", msg),
        e @ ServiceError::Overflow(_) => {
            tracing::error!(error = %e, "report aggregation overflowed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "overflow", e.to_string())
        }
        ServiceError::Store(e) => {
            tracing::error!(error = %e, "storage failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
        ServiceError::Export(e) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "export_error", e.to_string())
        }
    }
}

/// Malformed JSON bodies are validation errors, not framework 422s.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
