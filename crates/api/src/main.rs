use std::sync::Arc;

use anyhow::Context;

use catalog_api::{app, config::AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;
    catalog_observability::init(config.log_format);

    let coordinator = app::services::build_coordinator(&config.stores).await?;
    let app = app::build_app(Arc::new(coordinator));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
