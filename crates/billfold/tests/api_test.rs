//! Integration tests for the API module.

#![cfg(feature = "api")]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use billfold::api::{create_router, BillResponse, HealthResponse, InfoResponse};
use billfold::{
    BillfoldConfig, Completion, CompletionService, ExtractionPipeline, OcrEngine, OcrToken, Result,
};
use image::GrayImage;

struct NoopOcr;

#[async_trait]
impl OcrEngine for NoopOcr {
    async fn extract_text(&self, _image: &GrayImage) -> Result<String> {
        Ok(String::new())
    }

    async fn extract_tokens(&self, _image: &GrayImage) -> Result<Vec<OcrToken>> {
        Ok(Vec::new())
    }
}

struct NoopLlm;

#[async_trait]
impl CompletionService for NoopLlm {
    async fn complete(&self, _prompt: &str, _temperature: f64, _max_tokens: u32) -> Result<Completion> {
        Ok(Completion {
            text: "[]".to_string(),
            input_tokens: 0,
            output_tokens: 0,
        })
    }
}

fn test_router() -> axum::Router {
    let pipeline = Arc::new(ExtractionPipeline::new(
        Arc::new(NoopOcr),
        Arc::new(NoopLlm),
        BillfoldConfig::default(),
    ));
    create_router(pipeline)
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_router();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let health: HealthResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(health.status, "healthy");
    assert!(!health.version.is_empty());
}

#[tokio::test]
async fn test_info_endpoint() {
    let app = test_router();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let info: InfoResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(info.service, "billfold");
    assert!(info.endpoints.iter().any(|e| e.contains("/extract-bill-data")));
}

/// A document failure is a 200 envelope with is_success false and the token
/// usage accrued so far, never an HTTP error.
#[tokio::test]
async fn test_extract_failure_envelope() {
    let app = test_router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/extract-bill-data")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"document": "http://127.0.0.1:1/bill.pdf"}).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let envelope: BillResponse = serde_json::from_slice(&body).unwrap();

    assert!(!envelope.is_success);
    assert!(envelope.data.is_none());
    assert!(envelope.error.unwrap().contains("Fetch error"));
    assert_eq!(envelope.token_usage.total_tokens, 0);
}

#[tokio::test]
async fn test_extract_rejects_malformed_request() {
    let app = test_router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/extract-bill-data")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"no_document_field": true}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
