//! Discussion Viewer Backend
//!
//! Serves a GitHub Discussions board in one of two modes: live, backed by the
//! GraphQL API and a stored access token, or guest, backed by a static
//! snapshot document.

mod api;
mod config;
mod db;
mod errors;
mod graphql;
mod models;
mod repository;
mod snapshot;
mod store;
mod view;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use reqwest::Client;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::SqliteStore;
use graphql::{GithubApi, HttpExecutor};
use repository::DiscussionRepository;
use snapshot::SnapshotLoader;
use store::{KeyValueStore, MemoryStore, Storage};

/// `FORUM_DB_PATH` value selecting the process-local store.
const IN_MEMORY_DB: &str = ":memory:";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<DiscussionRepository>,
    pub storage: Storage,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Discussion Viewer Backend");
    tracing::info!("Repository: {}/{}", config.owner, config.repo);
    tracing::info!("GraphQL endpoint: {}", config.graphql_url);
    tracing::info!("Snapshot URL: {}", config.snapshot_url);
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize key-value store
    let backend: Arc<dyn KeyValueStore> = if config.db_path.as_os_str() == IN_MEMORY_DB {
        tracing::warn!("Using in-memory storage; the access token will not survive a restart");
        Arc::new(MemoryStore::new())
    } else {
        let pool = db::init_database(&config.db_path).await?;
        Arc::new(SqliteStore::new(pool))
    };
    let storage = Storage::new(backend, config.storage_prefix.clone());

    let client = Client::builder().user_agent(&config.user_agent).build()?;

    let executor = Arc::new(HttpExecutor::new(client.clone(), config.graphql_url.clone()));
    let api = GithubApi::new(executor, config.owner.clone(), config.repo.clone());
    let loader = SnapshotLoader::new(client, config.snapshot_url.clone());
    let repo = Arc::new(DiscussionRepository::new(storage.clone(), api, loader));

    tracing::info!("Starting in {:?} mode", repo.mode().await);

    // Create application state
    let state = AppState {
        repo,
        storage,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Discussions
        .route(
            "/discussions",
            get(api::list_discussions).post(api::create_discussion),
        )
        .route("/discussions/{number}", get(api::get_discussion))
        // Taxonomy
        .route("/categories", get(api::list_categories))
        .route("/labels", get(api::list_labels))
        // Search
        .route("/search", get(api::search_discussions))
        // Mutations addressed by node id
        .route("/nodes/{id}/comments", post(api::add_comment))
        .route(
            "/nodes/{id}/reactions",
            post(api::add_reaction).delete(api::remove_reaction),
        )
        .route(
            "/nodes/{id}/pin",
            post(api::pin_discussion).delete(api::unpin_discussion),
        )
        .route("/nodes/{id}/labels", post(api::add_labels))
        // Session
        .route(
            "/session",
            get(api::get_session)
                .put(api::set_session)
                .delete(api::clear_session),
        )
        .route("/viewer", get(api::get_viewer));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod testing;
