use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{response::Json, routing::get, Router};
use tower_http::cors::CorsLayer;

use imgopt_core::config::{ServiceConfig, BUCKET_HOST_VAR};
use imgopt_core::Pipeline;

mod handlers;

const ADDR: &str = "0.0.0.0:8080";

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServiceConfig::from_env().context("Failed to read configuration")?;
    if config.bucket_host.is_none() {
        log::warn!("{BUCKET_HOST_VAR} is not set, rel sources cannot be fetched");
    }
    if let Some(timeout) = config.fetch_timeout {
        log::info!("Upstream fetch timeout: {timeout:?}");
    }

    let pipeline = Pipeline::from_config(&config).context("Failed to build HTTP client")?;
    let app = router(AppState {
        pipeline: Arc::new(pipeline),
    });

    log::info!("🚀 imgopt server running on http://{}", ADDR);
    log::info!("📖 API endpoints:");
    log::info!("   GET /api/opt - Fetch and transform an image");
    log::info!("   GET /health  - Health check");

    let listener = tokio::net::TcpListener::bind(ADDR)
        .await
        .with_context(|| format!("Failed to bind {ADDR}"))?;
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/opt", get(handlers::optimize))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> &'static str {
    concat!(
        "imgopt v",
        env!("CARGO_PKG_VERSION"),
        "\n\nAPI Endpoints:\n  GET /api/opt?w=..&(rel|abs)=..\n  GET /health\n"
    )
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
