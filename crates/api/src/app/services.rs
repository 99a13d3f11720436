use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use catalog_infra::repository::{
    InMemoryProductRepository, MongoProductRepository, PostgresProductRepository, ProductRepository,
};
use catalog_infra::DualStoreCoordinator;

use crate::config::{PersistentStores, StoreConfig};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Wire the coordinator to the configured backends.
pub async fn build_coordinator(stores: &StoreConfig) -> anyhow::Result<DualStoreCoordinator> {
    match stores {
        StoreConfig::InMemory => {
            tracing::info!("using in-memory product stores");
            Ok(build_in_memory_coordinator())
        }
        StoreConfig::Persistent(cfg) => build_persistent_coordinator(cfg).await,
    }
}

/// Dev/test wiring: sequential-id primary, generated-id secondary.
pub fn build_in_memory_coordinator() -> DualStoreCoordinator {
    DualStoreCoordinator::new(
        Arc::new(InMemoryProductRepository::sequential()),
        Arc::new(InMemoryProductRepository::generated()),
    )
}

async fn build_persistent_coordinator(cfg: &PersistentStores) -> anyhow::Result<DualStoreCoordinator> {
    let primary = match &cfg.database_url {
        Some(url) => Some(connect_postgres(url, cfg.database_max_connections).await?),
        None => None,
    };

    let secondary = match &cfg.mongodb_uri {
        Some(uri) => Some(connect_mongo(uri, &cfg.mongodb_database, &cfg.mongodb_collection).await?),
        None => None,
    };

    DualStoreCoordinator::from_parts(primary, secondary)
        .context("DATABASE_URL and MONGODB_URI must both be set when USE_PERSISTENT_STORES=true")
}

async fn connect_postgres(url: &str, max_connections: u32) -> anyhow::Result<Arc<dyn ProductRepository>> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(CONNECT_TIMEOUT)
        .connect(url)
        .await
        .context("failed to connect to Postgres")?;

    tracing::info!(max_connections, "connected to Postgres primary store");
    Ok(Arc::new(PostgresProductRepository::new(pool)))
}

async fn connect_mongo(
    uri: &str,
    database: &str,
    collection: &str,
) -> anyhow::Result<Arc<dyn ProductRepository>> {
    let client = mongodb::Client::with_uri_str(uri)
        .await
        .context("failed to connect to MongoDB")?;

    tracing::info!(database, collection, "connected to MongoDB secondary store");
    Ok(Arc::new(MongoProductRepository::from_client(&client, database, collection)))
}
