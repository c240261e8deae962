//! HTTP server exposing the list, file, and thumbnail endpoints.

mod errors;
mod handlers;


pub use errors::ApiError;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;

/// Builds the router. The config is shared read-only across all requests.
pub fn build_router(config: Config) -> Router {
    let state = Arc::new(config);
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/api/list", get(handlers::list))
        .route("/api/file", get(handlers::file))
        .route("/api/thumbnail", get(handlers::thumbnail))
        .route("/api/health", get(handlers::health_check))
        .layer(cors)
        .with_state(state)
}

/// Binds the configured address and serves until the process exits.
pub async fn start_server(config: Config) -> Result<(), String> {
    let addr = config.bind_addr();
    let app = build_router(config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind server to {}: {}", addr, e))?;
    log::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("Server error: {}", e))
}
