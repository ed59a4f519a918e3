//! API server setup.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::core::config::BillfoldConfig;
use crate::core::pipeline::ExtractionPipeline;
use crate::error::{BillfoldError, Result};
use crate::llm::CompletionService;
use crate::ocr::OcrEngine;

use super::handlers::{extract_bill_data, health, info};
use super::types::ApiState;

/// Requests carry a single URL, so a small body cap is plenty.
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Create the API router over a shared pipeline.
///
/// Public to allow embedding the router in a larger application.
pub fn create_router(pipeline: Arc<ExtractionPipeline>) -> Router {
    let state = ApiState { pipeline };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(info))
        .route("/health", get(health))
        .route("/extract-bill-data", post(extract_bill_data))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server.
pub async fn serve(
    host: &str,
    port: u16,
    ocr: Arc<dyn OcrEngine>,
    llm: Arc<dyn CompletionService>,
    config: BillfoldConfig,
) -> Result<()> {
    let ip: IpAddr = host
        .parse()
        .map_err(|_| BillfoldError::validation(format!("invalid host address: {host}")))?;
    let addr = SocketAddr::new(ip, port);

    let pipeline = Arc::new(ExtractionPipeline::new(ocr, llm, config));
    let app = create_router(pipeline);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("billfold API listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| BillfoldError::Other(format!("server error: {e}")))?;

    Ok(())
}
