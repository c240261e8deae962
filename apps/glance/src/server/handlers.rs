//! Request handlers. Each resolves the path, then does its file system or image work
//! on the blocking pool so slow work never stalls request intake.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;

use super::ApiError;
use crate::config::Config;
use crate::file_system::{BrowseError, DirectoryListing, list_directory, read_file, resolve};
use crate::thumbnails::{clamp_edge, generate_thumbnail};

/// Thumbnails don't change for a given path often enough to revalidate.
const THUMBNAIL_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

#[derive(Debug, Deserialize)]
pub(super) struct PathQuery {
    #[serde(default)]
    path: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ThumbnailQuery {
    #[serde(default)]
    path: String,
    size: Option<u32>,
}

/// Runs blocking work off the async executor threads.
async fn run_blocking<T, F>(work: F) -> Result<T, BrowseError>
where
    F: FnOnce() -> Result<T, BrowseError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| BrowseError::Internal {
            message: format!("worker task failed: {}", e),
        })?
}

pub(super) async fn health_check() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

pub(super) async fn list(
    State(config): State<Arc<Config>>,
    Query(query): Query<PathQuery>,
) -> Result<Json<DirectoryListing>, ApiError> {
    let start = Instant::now();
    let resolved = resolve(&query.path, &config)?;
    let listing = run_blocking(move || list_directory(&resolved)).await?;
    log::debug!(
        "GET /api/list: path={}, entries={}, {}ms",
        query.path,
        listing.entries.len(),
        start.elapsed().as_millis()
    );
    Ok(Json(listing))
}

pub(super) async fn file(
    State(config): State<Arc<Config>>,
    Query(query): Query<PathQuery>,
) -> Result<Response, ApiError> {
    let start = Instant::now();
    let resolved = resolve(&query.path, &config)?;
    let contents = run_blocking(move || read_file(&resolved)).await?;
    log::debug!(
        "GET /api/file: path={}, bytes={}, {}ms",
        query.path,
        contents.bytes.len(),
        start.elapsed().as_millis()
    );
    Ok(([(header::CONTENT_TYPE, contents.content_type)], contents.bytes).into_response())
}

pub(super) async fn thumbnail(
    State(config): State<Arc<Config>>,
    Query(query): Query<ThumbnailQuery>,
) -> Result<Response, ApiError> {
    let start = Instant::now();
    let max_edge = clamp_edge(query.size.unwrap_or(config.thumbnail_size));
    let resolved = resolve(&query.path, &config)?;
    let thumb = run_blocking(move || generate_thumbnail(&resolved, max_edge)).await?;
    log::debug!(
        "GET /api/thumbnail: path={}, max_edge={}, bytes={}, {}ms",
        query.path,
        max_edge,
        thumb.bytes.len(),
        start.elapsed().as_millis()
    );
    Ok((
        [
            (header::CONTENT_TYPE, thumb.content_type),
            (header::CACHE_CONTROL, THUMBNAIL_CACHE_CONTROL.to_string()),
        ],
        thumb.bytes,
    )
        .into_response())
}
