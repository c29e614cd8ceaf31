use axum::{Router, routing::get};

pub mod audit;
pub mod employees;
pub mod products;
pub mod reports;
pub mod sales;
pub mod system;

/// Router for all endpoints that see the caller's `ActorContext`.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/products", products::router())
        .nest("/employees", employees::router())
        .nest("/sales", sales::router())
        .nest("/reports", reports::router())
        .nest("/audit", audit::router())
}
