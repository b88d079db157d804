//! AdLens API Server
//!
//! Local HTTP backend for the AdLens browser extension.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     ADLENS SERVER                        │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌────────────────┐   ┌───────────────┐  │
//! │  │  Router   │──►│  Prediction    │──►│ OracleRegistry│  │
//! │  │  (Axum)   │   │  Pipeline      │   │  (hot reload) │  │
//! │  └───────────┘   └────────────────┘   └───────┬───────┘  │
//! │                                               ▼          │
//! │                                       ┌───────────────┐  │
//! │                                       │ model artifact│  │
//! │                                       └───────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod config;
mod handlers;
mod error;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue},
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
    set_header::SetResponseHeaderLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adlens_core::{OracleRegistry, PredictionPipeline};

pub use error::{AppError, AppResult};

/// Lets extension service workers reach a localhost backend
const PRIVATE_NETWORK_HEADER: &str = "access-control-allow-private-network";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();

    // Initialize logging (also captures `log` records from adlens-core)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "adlens_server=debug,adlens_core=info,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from_env();

    tracing::info!("AdLens server v{} starting ({})", env!("CARGO_PKG_VERSION"), config.environment);
    tracing::info!("Model artifact: {}", config.model_path.display());
    tracing::info!(
        "Limits: {} candidates, {} MB, confidence threshold {}",
        config.pipeline.max_candidates,
        config.pipeline.max_request_size_mb,
        config.pipeline.confidence_threshold
    );

    let registry = Arc::new(OracleRegistry::load_or_empty(&config.model_path));
    if !registry.is_loaded() && config.is_production() {
        tracing::warn!("Serving without a model; /predict will answer 503");
    }

    let state = AppState::new(config.clone(), registry);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", config.host, config.port))?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<OracleRegistry>,
    pub pipeline: Arc<PredictionPipeline>,
    pub config: config::Config,
}

impl AppState {
    pub fn new(config: config::Config, registry: Arc<OracleRegistry>) -> Self {
        Self {
            registry,
            pipeline: Arc::new(PredictionPipeline::new(config.pipeline)),
            config,
        }
    }
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let body_limit = state.config.pipeline.max_request_bytes();

    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .route("/reload-model", post(handlers::model::reload))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(PRIVATE_NETWORK_HEADER),
            HeaderValue::from_static("true"),
        ))
        .with_state(state)
}
