//! Request middleware: per-request tracing and caller identity resolution.
//!
//! Every request gets an [`ActorContext`] extension. Identification never fails
//! here: a missing name yields an anonymous actor and a wrong secret yields a
//! plain viewer. The service layer decides what each actor may do.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use tracing::Instrument;

use salesreward_auth::{ActorContext, SecretVerifier, resolve_actor};

pub const ACTOR_HEADER: &str = "x-actor";
pub const EDITOR_SECRET_HEADER: &str = "x-editor-secret";

/// Wraps each request in an `http_request` span and logs its outcome.
pub async fn trace_request(req: Request<axum::body::Body>, next: Next) -> Response {
    let span = tracing::info_span!(
        "http_request",
        method = %req.method(),
        path = %req.uri().path(),
    );
    let started = Instant::now();

    let response = next.run(req).instrument(span.clone()).await;

    let status = response.status();
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    span.in_scope(|| {
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), elapsed_ms, "request failed");
        } else {
            tracing::info!(status = status.as_u16(), elapsed_ms, "request handled");
        }
    });
    response
}

#[derive(Clone)]
pub struct ActorState {
    pub verifier: Arc<dyn SecretVerifier>,
}

pub async fn actor_middleware(
    State(state): State<ActorState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let actor = actor_from_headers(req.headers(), state.verifier.as_ref());
    req.extensions_mut().insert(actor);
    next.run(req).await
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

pub fn actor_from_headers(headers: &HeaderMap, verifier: &dyn SecretVerifier) -> ActorContext {
    resolve_actor(
        header(headers, ACTOR_HEADER),
        header(headers, EDITOR_SECRET_HEADER),
        verifier,
    )
}
