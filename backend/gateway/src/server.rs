//! Main HTTP server.
//!
//! Routes: `GET /` (liveness/info), `POST /api/upload` (FIR extraction).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::info;

use firlens_core::DocumentExtractor;

use crate::upload;

/// Document images can be large scans; the axum default of 2 MB is too low.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Application state shared across routes.
pub struct GatewayState {
    pub extractor: Arc<dyn DocumentExtractor>,
    pub upload_dir: PathBuf,
}

impl GatewayState {
    pub fn new(extractor: Arc<dyn DocumentExtractor>, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            extractor,
            upload_dir: upload_dir.into(),
        }
    }
}

/// Build the Axum router with all API routes.
pub fn build_router(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/api/upload", post(upload::upload_file))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

/// Starts the HTTP server.
pub async fn start_server(addr: SocketAddr, app: Router) -> Result<()> {
    info!("FIRLens gateway listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Handler for `GET /`.
async fn service_info() -> Json<Value> {
    Json(json!({
        "message": "LlamaCloud Text Extractor API",
        "version": "2.0",
        "urdu_support": true,
    }))
}
