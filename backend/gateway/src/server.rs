use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use heuristics::ResponsePipeline;
use snapsolve_inference::InferenceClient;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{analyze, health};

/// Application state shared across routes. Read-only after startup.
#[derive(Clone)]
pub struct GatewayState {
    pub inference: Arc<InferenceClient>,
    pub pipeline: Arc<ResponsePipeline>,
}

/// Build the Axum router with all routes.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/analyze", post(analyze::analyze_image))
        .route("/api/health", get(health::get_health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway HTTP server.
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = build_router(state);
    info!("gateway HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
