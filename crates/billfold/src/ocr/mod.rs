//! OCR collaborator interface.
//!
//! The pipeline depends on the `OcrEngine` trait only; backends are
//! interchangeable. Backend capability set: full-text extraction, token
//! extraction with bounding boxes and confidence, and optional table
//! detection (a backend without table support returns an empty list, not
//! an error).

mod tesseract;

pub use tesseract::{parse_tsv_tokens, TesseractOcr};

use crate::error::Result;
use crate::types::{BoundingBox, OcrToken};
use async_trait::async_trait;
use image::GrayImage;

/// A detected table region on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRegion {
    pub bbox: BoundingBox,
    pub confidence: f64,
}

/// Trait for OCR engines.
///
/// Implementations must be thread-safe; one engine instance is shared across
/// pipeline runs. OCR failures are fatal for the document run: errors from
/// these methods propagate to the top-level guard.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Extract the page's full text.
    async fn extract_text(&self, image: &GrayImage) -> Result<String>;

    /// Extract recognized tokens with bounding boxes and confidence.
    ///
    /// Returned tokens are filtered to confidence > 0; empty fragments are
    /// never reported.
    async fn extract_tokens(&self, image: &GrayImage) -> Result<Vec<OcrToken>>;

    /// Detect table regions on the page.
    ///
    /// Optional capability: the default implementation reports no tables.
    async fn detect_tables(&self, _image: &GrayImage) -> Result<Vec<TableRegion>> {
        Ok(Vec::new())
    }
}
