//! API request and response types.

use crate::core::pipeline::{ExtractionPipeline, RunReport};
use crate::types::{ExtractedData, TokenUsage};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Extraction request: the URL of the bill document (image or PDF).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillRequest {
    pub document: String,
}

/// Extraction response envelope.
///
/// `token_usage` is populated even when `is_success` is false and reflects
/// everything accrued before the failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillResponse {
    pub is_success: bool,
    pub token_usage: TokenUsage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ExtractedData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<RunReport> for BillResponse {
    fn from(report: RunReport) -> Self {
        match report.invoice {
            Some(invoice) => {
                let total_item_count = invoice.item_count();
                Self {
                    is_success: true,
                    token_usage: report.token_usage,
                    data: Some(ExtractedData {
                        pagewise_line_items: invoice.pages,
                        total_item_count,
                    }),
                    error: None,
                }
            }
            None => Self {
                is_success: false,
                token_usage: report.token_usage,
                data: None,
                error: report.error,
            },
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Service information response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResponse {
    pub service: String,
    pub version: String,
    pub endpoints: Vec<String>,
}

/// Shared server state.
///
/// The pipeline carries no per-run mutable state, so one instance is shared
/// across concurrent requests; each request gets its own run and token
/// accumulator.
#[derive(Clone)]
pub struct ApiState {
    pub pipeline: Arc<ExtractionPipeline>,
}
