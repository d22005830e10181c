//! Web layer: shared state, routing, and request handlers.

pub mod handlers;
pub mod view;

use crate::ai::GenerationService;
use crate::image::ImageService;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Uploads above this size are rejected by the extractor.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Shared server state. Services are immutable once built; every request
/// is independent, so no locking is needed.
pub struct AppState {
    pub generator: Box<dyn GenerationService>,
    pub images: Box<dyn ImageService>,
    pub image_dir: PathBuf,
}

pub type SharedState = Arc<AppState>;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/generate", post(handlers::generate))
        .route("/generated/{filename}", get(handlers::generated_image))
        .route("/healthz", get(handlers::health_check))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

/// Serve the app on an already-bound listener until the process exits.
pub async fn serve(listener: tokio::net::TcpListener, state: SharedState) -> crate::Result<()> {
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
