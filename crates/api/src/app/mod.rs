//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: storage backend selection and the shared service handle
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use salesreward_auth::SecretVerifier;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(services: Arc<AppServices>, verifier: Arc<dyn SecretVerifier>) -> Router {
    let actor_state = middleware::ActorState { verifier };

    let identified = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            actor_state,
            middleware::actor_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(identified)
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::trace_request)))
}
