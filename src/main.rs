//! Inventory Dashboard Backend
//!
//! REST and form-action backend for personnel and vehicle records, with SQLite
//! persistence and an append-only activity log.

mod actions;
mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod search;
mod services;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use auth::SessionGuard;
use config::{Config, LogFormat};
use db::Repository;
use models::{Personnel, Record, Vehicle};
use services::{Clock, RecordService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub guard: Arc<SessionGuard>,
    pub clock: Arc<Clock>,
}

impl AppState {
    pub fn new(repo: Repository, config: &Config) -> Self {
        Self {
            repo: Arc::new(repo),
            guard: Arc::new(SessionGuard::new(&config.api_keys)),
            clock: Arc::new(Clock::new()),
        }
    }

    /// Record service for one collection.
    pub fn records<R: Record>(&self) -> RecordService<'_, R> {
        RecordService::new(&self.repo, &self.clock)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let json_layer = (config.log_format == LogFormat::Json)
        .then(|| tracing_subscriber::fmt::layer().json());
    let pretty_layer =
        (config.log_format == LogFormat::Pretty).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .init();

    tracing::info!("Starting Inventory Dashboard Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.api_keys.is_empty() {
        tracing::warn!(
            "No API keys configured (DASHBOARD_API_KEYS). Every request acts as {}!",
            auth::DEV_PRINCIPAL_NAME
        );
    } else {
        tracing::info!("{} API key(s) configured", config.api_keys.len());
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Repository::new(pool);

    let state = AppState::new(repo, &config);

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
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

    let guard = state.guard.clone();

    // API routes
    let api_routes = Router::new()
        // Personnel
        .route(
            "/personnel",
            get(api::list_records::<Personnel>).post(api::create_record::<Personnel>),
        )
        .route(
            "/personnel/{id}",
            get(api::get_record::<Personnel>)
                .put(api::update_record::<Personnel>)
                .delete(api::delete_record::<Personnel>),
        )
        // Vehicles
        .route(
            "/vehicles",
            get(api::list_records::<Vehicle>).post(api::create_record::<Vehicle>),
        )
        .route(
            "/vehicles/{id}",
            get(api::get_record::<Vehicle>)
                .put(api::update_record::<Vehicle>)
                .delete(api::delete_record::<Vehicle>),
        )
        // Activity log and revision
        .route("/activity", get(api::list_activity))
        .route("/revision", get(api::get_revision));

    // Form actions
    let action_routes = Router::new()
        .route("/personnel", get(actions::get_personnel))
        .route("/personnel/create", post(actions::create_personnel))
        .route("/personnel/update", post(actions::update_personnel))
        .route("/personnel/delete", post(actions::delete_personnel))
        .route("/personnel/assign", post(actions::assign_personnel))
        .route("/personnel/return", post(actions::return_personnel));

    // Resolve the session for everything except the health check
    let guarded_routes = Router::new()
        .nest("/api", api_routes)
        .nest("/actions", action_routes)
        .layer(middleware::from_fn(move |req, next| {
            auth::session_layer(guard.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .merge(guarded_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
