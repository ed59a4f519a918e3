//! REST API for bill extraction.
//!
//! Axum-based HTTP surface over the extraction pipeline.
//!
//! # Endpoints
//!
//! - `POST /extract-bill-data` - extract line items from a bill URL
//! - `GET /health` - health check
//! - `GET /` - service info
//!
//! # Examples
//!
//! ```no_run
//! use billfold::api::serve;
//! use billfold::{BillfoldConfig, GroqClient, TesseractOcr};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> billfold::Result<()> {
//!     let config = BillfoldConfig::default();
//!     let ocr = Arc::new(TesseractOcr::new(&config.ocr.language, config.ocr.psm));
//!     let llm = Arc::new(GroqClient::from_env(config.llm.base_url.as_deref(), &config.llm.model)?);
//!     serve("127.0.0.1", 8000, ocr, llm, config).await
//! }
//! ```
//!
//! ```bash
//! curl -X POST http://localhost:8000/extract-bill-data \
//!      -H 'Content-Type: application/json' \
//!      -d '{"document": "https://example.com/bill.pdf"}'
//! ```

mod handlers;
mod server;
mod types;

pub use server::{create_router, serve};
pub use types::{ApiState, BillRequest, BillResponse, HealthResponse, InfoResponse};
