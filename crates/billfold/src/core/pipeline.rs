//! Per-document extraction run.
//!
//! Strictly sequential: download, decode pages, then for each page in order
//! preprocess → OCR → fast-path row reconstruction → conditional LLM slow
//! path → classification; after the page loop, document-wide deduplication
//! and total reconciliation. One run owns one `TokenUsage`; serving layers
//! start a fresh run per request.

use crate::core::config::BillfoldConfig;
use crate::core::{input, input::DocumentFetcher, preprocess};
use crate::error::Result;
use crate::extraction::{classify_page, extract_declared_total, group_tokens, parse_row, validate_math};
use crate::extraction::{Deduplicator, FallbackBridge};
use crate::llm::CompletionService;
use crate::ocr::OcrEngine;
use crate::types::{Invoice, LineItem, PageData, TokenUsage};
use image::DynamicImage;
use std::sync::Arc;

/// Outcome of one document run.
///
/// `token_usage` reflects everything accrued before a failure, so it is
/// meaningful whether or not `invoice` is present. `math_valid` carries the
/// reconciliation verdict for the caller to interpret; it never makes the
/// run a failure.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub invoice: Option<Invoice>,
    pub token_usage: TokenUsage,
    pub math_valid: bool,
    pub error: Option<String>,
}

/// The bill extraction pipeline.
///
/// Holds the shared collaborators; all per-run mutable state (the token
/// accumulator) lives in the run itself, which makes sharing one pipeline
/// across concurrent requests safe by construction.
pub struct ExtractionPipeline {
    ocr: Arc<dyn OcrEngine>,
    bridge: FallbackBridge,
    fetcher: DocumentFetcher,
    config: BillfoldConfig,
}

impl ExtractionPipeline {
    pub fn new(ocr: Arc<dyn OcrEngine>, llm: Arc<dyn CompletionService>, config: BillfoldConfig) -> Self {
        let bridge = FallbackBridge::new(llm, config.llm.temperature, config.llm.max_tokens);
        Self {
            ocr,
            bridge,
            fetcher: DocumentFetcher::new(),
            config,
        }
    }

    /// Process a bill document by URL.
    ///
    /// The top-level guard: fatal errors (fetch, OCR) are converted into the
    /// report's `error` string here and never escape, and the downloaded
    /// temporary file is removed on every exit path.
    pub async fn process_url(&self, url: &str) -> RunReport {
        let mut usage = TokenUsage::default();

        match self.process_inner(url, &mut usage).await {
            Ok(invoice) => {
                let math_valid = validate_math(&invoice);
                if !math_valid {
                    tracing::info!(
                        declared = invoice.total_amount,
                        calculated = invoice.calculated_total(),
                        "declared total did not reconcile with reconstructed items"
                    );
                }
                RunReport {
                    invoice: Some(invoice),
                    token_usage: usage,
                    math_valid,
                    error: None,
                }
            }
            Err(e) => {
                tracing::error!(error = %e, url, "document run failed");
                RunReport {
                    invoice: None,
                    token_usage: usage,
                    math_valid: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    async fn process_inner(&self, url: &str, usage: &mut TokenUsage) -> Result<Invoice> {
        // The NamedTempFile guard lives for this scope; success, handled
        // error, or fault, the downloaded artifact is removed.
        let file = self.fetcher.download(url).await?;
        let pages = input::load_pages(file.path(), self.config.render.target_dpi);
        self.process_pages(&pages, usage).await
    }

    /// Run the page loop and document-wide reconciliation over decoded pages.
    ///
    /// Public seam for callers that already hold raster pages (tests, local
    /// files).
    pub async fn process_pages(&self, pages: &[DynamicImage], usage: &mut TokenUsage) -> Result<Invoice> {
        let mut pages_data = Vec::with_capacity(pages.len());
        let mut last_page_text: Option<String> = None;

        for (index, page) in pages.iter().enumerate() {
            let page_no = index + 1;
            tracing::debug!(page_no, "processing page");

            let normalized = preprocess::normalize(page);
            let raw_text = self.ocr.extract_text(&normalized).await?;
            let tokens = self.ocr.extract_tokens(&normalized).await?;

            // Fast path: token rows to items.
            let mut items: Vec<LineItem> = group_tokens(tokens)
                .iter()
                .filter_map(|row| parse_row(&row.text()))
                .collect();

            // Slow path, only when the fast path produced nothing.
            if items.is_empty() {
                tracing::info!(page_no, "no items via OCR heuristics; delegating page to LLM");
                items = self.bridge.reconstruct(&raw_text, usage).await;
            }

            let page_type = classify_page(&raw_text);
            pages_data.push(PageData {
                page_no: page_no.to_string(),
                page_type,
                bill_items: items,
            });
            last_page_text = Some(raw_text);
        }

        Deduplicator::deduplicate_pages(&mut pages_data);

        let total_amount = last_page_text.as_deref().map(extract_declared_total).unwrap_or(0.0);

        let invoice = Invoice {
            pages: pages_data,
            total_amount,
            ..Default::default()
        };

        tracing::info!(
            pages = invoice.pages.len(),
            items = invoice.item_count(),
            declared_total = invoice.total_amount,
            "document run complete"
        );

        Ok(invoice)
    }
}
