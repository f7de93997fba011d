mod catalog;
mod config;
mod digest;
mod errors;
mod matching;
mod models;
mod preferences;
mod routes;
mod saved;
mod session;
mod state;
mod storage;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::Catalog;
use crate::config::{Config, StorageBackend};
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{InMemoryStore, KeyValueStore, RedisStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on invalid env values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Tracker API v{}", env!("CARGO_PKG_VERSION"));

    // Load the read-only job catalog
    let catalog = Catalog::load(config.catalog_path.as_deref())?;

    // Initialize key-value persistence
    let kv = build_store(&config).await?;
    info!("Storage backend: {}", config.storage_backend);

    // Build app state
    let state = AppState::new(&config, catalog, kv);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Picks the key-value backend named by `STORAGE_BACKEND`.
async fn build_store(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match (config.storage_backend, config.redis_url.as_deref()) {
        (StorageBackend::Redis, Some(url)) => Arc::new(RedisStore::connect(url).await?),
        (StorageBackend::Redis, None) => anyhow::bail!("REDIS_URL is not set"),
        (StorageBackend::Memory, _) => Arc::new(InMemoryStore::new()),
    };
    Ok(store)
}
