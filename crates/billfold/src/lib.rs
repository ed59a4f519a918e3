//! Billfold - Bill Line-Item Extraction Pipeline
//!
//! Billfold turns a scanned or digital bill (image or multi-page PDF) into a
//! structured set of line items plus a validated document total. The core is
//! the row-reconstruction pipeline: OCR tokens are clustered into visual
//! rows, rows are parsed into typed line items via numeric-position
//! heuristics, pages the heuristics cannot read fall back to an LLM
//! completion service, near-duplicate items are removed document-wide, and
//! the reconstructed sum is reconciled against the bill's declared total.
//!
//! # Quick Start
//!
//! ```no_run
//! use billfold::{BillfoldConfig, ExtractionPipeline, GroqClient, TesseractOcr};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> billfold::Result<()> {
//! let config = BillfoldConfig::default();
//! let ocr = Arc::new(TesseractOcr::new(&config.ocr.language, config.ocr.psm));
//! let llm = Arc::new(GroqClient::from_env(config.llm.base_url.as_deref(), &config.llm.model)?);
//!
//! let pipeline = ExtractionPipeline::new(ocr, llm, config);
//! let report = pipeline.process_url("https://example.com/bill.pdf").await;
//! println!("items: {:?}", report.invoice.map(|i| i.item_count()));
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Core** (`core`): pipeline orchestration, document input, page
//!   preprocessing, configuration
//! - **Extraction** (`extraction`): row clustering, row parsing, page
//!   classification, LLM fallback, deduplication, total reconciliation
//! - **Collaborators** (`ocr`, `llm`): trait seams with one concrete
//!   backend each (Tesseract subprocess, Groq chat completions)
//! - **API** (`api`, feature `api`): axum HTTP surface

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod extraction;
pub mod llm;
pub mod ocr;
pub mod types;

#[cfg(feature = "api")]
pub mod api;

pub use error::{BillfoldError, Result};
pub use types::*;

pub use core::config::{BillfoldConfig, LlmConfig, OcrConfig, RenderConfig};
pub use core::pipeline::{ExtractionPipeline, RunReport};
pub use llm::{Completion, CompletionService, GroqClient};
pub use ocr::{OcrEngine, TesseractOcr};
