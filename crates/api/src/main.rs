use std::sync::Arc;

use anyhow::Context;

use salesreward_auth::SharedSecret;
use salesreward_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the environment may already be populated.
    let _ = dotenvy::dotenv();
    salesreward_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!(?config, "configuration loaded");

    let services = Arc::new(salesreward_api::app::services::build_services(&config));
    let verifier = Arc::new(SharedSecret::new(config.editor_secret.clone()));
    let app = salesreward_api::app::build_app(services, verifier);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
