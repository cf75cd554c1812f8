mod config;
mod db;
mod errors;
mod extract;
mod items;
mod matching;
mod models;
mod routes;
mod state;
mod storage;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StoreBackend};
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{InMemoryItemStore, ItemStore, PgItemStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing or malformed env vars)
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

    info!("Starting lost-and-found API v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn ItemStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres item store")?;
            Arc::new(PgItemStore::new(create_pool(database_url).await?))
        }
        StoreBackend::Memory => {
            info!("Using in-memory item store; reports are lost on restart");
            Arc::new(InMemoryItemStore::new())
        }
    };

    let weights = &config.matching.weights;
    info!(
        "Match config: weights name={} category={} location={}, threshold>{}, min name token {}",
        weights.name,
        weights.category,
        weights.location,
        config.matching.threshold,
        config.matching.min_name_token_len
    );

    let state = AppState::new(store, config.clone());

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
