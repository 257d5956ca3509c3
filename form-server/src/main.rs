//! Student Pass Predictor - Form Server
//!
//! HTTP front end for the pass predictor. Serves the form schema and turns
//! submitted answers into a pass/drop-out verdict.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      FORM SERVER                             │
//! ├──────────────────────────────────────────────────────────────┤
//! │  GET  /api/v1/form     ──▶ FormSchema (sections, defaults)   │
//! │  POST /api/v1/predict  ──▶ validate ─▶ Predictor ─▶ verdict  │
//! │                                          │                   │
//! │                     ┌────────────────────┴─────────────┐     │
//! │                     │ min-max scaler │ ONNX classifier │     │
//! │                     └──────────────────────────────────┘     │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod handlers;
mod error;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use passpredict_core::Predictor;
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env()
        .context("Invalid configuration")?;

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "passpredict_server=debug,passpredict_core=info,tower_http=debug".into());
    let (json_layer, text_layer) = if config.log_json || config.is_production() {
        (Some(tracing_subscriber::fmt::layer().json()), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer()))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    tracing::info!("Student Pass Predictor starting ({})...", config.environment);
    tracing::info!("Model: {}", config.artifacts.model_path);
    tracing::info!("Scaler: {}", config.artifacts.scaler_path);

    // Artifacts must load before the listener opens
    let predictor = Predictor::load(&config.artifacts)
        .context("Failed to load prediction artifacts")?;

    // Build application state
    let state = AppState {
        predictor: Arc::new(predictor),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/v1/form", get(handlers::form::schema))
        .route("/api/v1/model", get(handlers::model::status))
        .route("/api/v1/encode", post(handlers::predict::encode_input))
        .route("/api/v1/predict", post(handlers::predict::predict));

    Router::new()
        .route("/health", get(handlers::health::check))
        .merge(api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
