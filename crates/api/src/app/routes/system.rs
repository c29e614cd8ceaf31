use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use salesreward_auth::ActorContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(actor): Extension<ActorContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "actor": actor.display_name(),
        "anonymous": actor.is_anonymous(),
        "editor": actor.is_editor(),
    }))
}
