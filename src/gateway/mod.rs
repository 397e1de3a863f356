//! HTTP gateway exposing extraction and generation over a small JSON API.

mod handlers;

use crate::backend::OpenRouterBackend;
use crate::config::Config;
use crate::content::ContentPipeline;
use crate::error::Result;
use crate::extract::LinkExtractor;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use std::sync::Arc;
use std::time::Duration;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

/// Request bodies above this are rejected before parsing.
const MAX_BODY_SIZE: usize = 65_536;
/// Per-request wall clock budget. Generation calls dominate this, so it
/// must outlast the completion client's own deadline; cutting a request
/// off earlier would skip fallback synthesis and answer with an empty 408.
const REQUEST_TIMEOUT_SECS: u64 = 150;

#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<LinkExtractor>,
    pub pipeline: Arc<ContentPipeline>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/link-context", get(handlers::link_context))
        .route("/personas", post(handlers::personas))
        .route("/generate", post(handlers::generate))
        .route("/convert", post(handlers::convert))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        ))
}

pub async fn run_gateway(host: &str, port: u16, config: &Config) -> Result<()> {
    let backend = Arc::new(OpenRouterBackend::new(
        config.backend.api_key.as_deref(),
        &config.backend.model,
        config.backend.temperature,
    ));
    let state = AppState {
        extractor: Arc::new(LinkExtractor::new(&config.extract)),
        pipeline: Arc::new(ContentPipeline::new(backend)),
    };

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!(host, port, "gateway listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to install the ctrl-c handler");
    }
    tracing::info!("shutting down");
}
