//! API request handlers.

use axum::{extract::State, Json};

use super::types::{ApiState, BillRequest, BillResponse, HealthResponse, InfoResponse};

/// Extraction endpoint handler.
///
/// POST /extract-bill-data
///
/// Accepts `{ "document": "<url>" }` and returns the extraction envelope.
/// A failed run is still a 200 response with `is_success: false` and the
/// token usage accrued before the failure; the serving process never
/// surfaces a document failure as an HTTP error.
pub async fn extract_bill_data(State(state): State<ApiState>, Json(request): Json<BillRequest>) -> Json<BillResponse> {
    let report = state.pipeline.process_url(&request.document).await;
    Json(BillResponse::from(report))
}

/// Health check endpoint handler.
///
/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Service info endpoint handler.
///
/// GET /
pub async fn info() -> Json<InfoResponse> {
    Json(InfoResponse {
        service: "billfold".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: vec![
            "POST /extract-bill-data".to_string(),
            "GET /health".to_string(),
        ],
    })
}
