//! Hackathon server - Application Entry Point
//!
//! This is the main entry point for the hackathon backend.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, middleware};
use redis::Client as RedisClient;
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use hackathon_server::{
    azure::{AzureBlobStore, BlobStore, CloudServiceAdapter, ServiceManagementClient},
    config::Config,
    db, handlers,
    middleware::{logging_middleware, rate_limit_middleware},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.server.rust_log));
    let registry = tracing_subscriber::registry().with(filter);
    if config.server.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting hackathon server...");

    // Initialize database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database).await?;

    // Run database migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    // Initialize Redis connection
    tracing::info!("Connecting to Redis...");
    let redis_client = RedisClient::open(config.redis.url.as_str())?;
    let redis_conn = redis::aio::ConnectionManager::new(redis_client).await?;

    // Cloud clients are optional
    let blob_store = AzureBlobStore::from_config(&config.storage)?
        .map(|store| Arc::new(store) as Arc<dyn BlobStore>);
    match &blob_store {
        Some(_) => tracing::info!(container = %config.storage.image_container, "Blob storage configured"),
        None => tracing::warn!("Blob storage not configured, uploads are disabled"),
    }

    let cloud_services = ServiceManagementClient::from_config(&config.azure)
        .await?
        .map(|client| Arc::new(CloudServiceAdapter::from_config(Arc::new(client), &config.azure)));
    match &cloud_services {
        Some(_) => tracing::info!("Cloud service management configured"),
        None => tracing::warn!("No subscription configured, cloud service management is disabled"),
    }

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    // Create application state
    let state = AppState::new(db_pool, redis_conn, blob_store, cloud_services, config);

    // Build the router
    let app = Router::new()
        .nest("/api/v1", handlers::routes(state.clone()))
        .layer(middleware::from_fn_with_state(state.clone(), rate_limit_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start the server
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
