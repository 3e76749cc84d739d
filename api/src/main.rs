//! GitFeed API Server
//!
//! Ingests GitHub webhook deliveries, normalizes them into repository
//! activity events, and serves them to the feed client.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::SqliteEventRepository;
use app::EventService;
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub event_service: Arc<EventService<SqliteEventRepository>>,
    pub config: Config,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the router with all routes and middleware
fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Webhooks (no auth, uses signature verification)
        .route("/webhooks/github", post(handlers::github_webhook))
        // Event listing consumed by the feed client
        .route("/api/events", get(handlers::list_events))
        // Store connectivity probe
        .route("/test-db", get(handlers::insert_test_event))
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,gitfeed_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting GitFeed API...");

    // Load configuration
    let config = Config::from_env();

    // Open the event store
    tracing::info!(path = %config.database_path, "Opening event store...");
    let event_repo = Arc::new(
        SqliteEventRepository::open(&config.database_path).expect("Failed to open event store"),
    );
    tracing::info!("Event store ready");

    let event_service = Arc::new(EventService::new(event_repo));

    let state = AppState {
        event_service,
        config,
    };

    let app = build_router(state);

    // Start server
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
