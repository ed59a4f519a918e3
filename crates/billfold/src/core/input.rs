//! Document download and page decoding.
//!
//! Download failures are fatal for the run (the `Fetch` error channel);
//! unreadable or unsupported bytes are not: decoding yields zero pages and
//! the caller proceeds with an empty document.

use crate::error::{BillfoldError, Result};
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const PDF_POINTS_PER_INCH: f32 = 72.0;

/// Downloads documents into scope-guarded temporary files.
#[derive(Debug, Clone, Default)]
pub struct DocumentFetcher {
    client: reqwest::Client,
}

impl DocumentFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Download a document URL into a temporary file.
    ///
    /// The returned guard removes the file when dropped, on every exit path
    /// of the caller.
    pub async fn download(&self, url: &str) -> Result<NamedTempFile> {
        tracing::debug!(url, "downloading document");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| BillfoldError::fetch_with_source(format!("failed to download {url}"), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BillfoldError::fetch(format!("download of {url} returned {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BillfoldError::fetch_with_source(format!("failed to read body of {url}"), e))?;

        let mut file = tempfile::Builder::new().prefix("billfold-doc-").tempfile()?;
        file.write_all(&bytes)?;
        file.flush()?;
        Ok(file)
    }
}

/// Decode a downloaded document into raster page images, in page order.
///
/// PDFs are rasterized page by page at the given DPI; single images decode
/// to one page. Anything unreadable yields zero pages.
pub fn load_pages(path: &Path, target_dpi: u32) -> Vec<DynamicImage> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "could not read downloaded document; treating as zero pages");
            return Vec::new();
        }
    };

    match infer::get(&bytes) {
        Some(kind) if kind.mime_type() == "application/pdf" => render_pdf_pages(&bytes, target_dpi),
        Some(kind) if kind.mime_type().starts_with("image/") => match image::load_from_memory(&bytes) {
            Ok(img) => vec![img],
            Err(e) => {
                tracing::warn!(error = %e, "image decode failed; treating as zero pages");
                Vec::new()
            }
        },
        other => {
            tracing::warn!(
                mime = other.map(|k| k.mime_type()).unwrap_or("unknown"),
                "unsupported document type; treating as zero pages"
            );
            Vec::new()
        }
    }
}

fn render_pdf_pages(pdf_bytes: &[u8], target_dpi: u32) -> Vec<DynamicImage> {
    let binding = match Pdfium::bind_to_system_library() {
        Ok(binding) => binding,
        Err(e) => {
            tracing::warn!(error = %e, "pdfium unavailable; treating PDF as zero pages");
            return Vec::new();
        }
    };
    let pdfium = Pdfium::new(binding);

    let document = match pdfium.load_pdf_from_byte_slice(pdf_bytes, None) {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!(error = %e, "unreadable PDF; treating as zero pages");
            return Vec::new();
        }
    };

    let scale = target_dpi as f32 / PDF_POINTS_PER_INCH;
    let mut images = Vec::with_capacity(document.pages().len() as usize);

    for page in document.pages().iter() {
        let config = PdfRenderConfig::new()
            .set_target_width(((page.width().value * scale) as i32).max(1))
            .set_target_height(((page.height().value * scale) as i32).max(1));

        match page.render_with_config(&config) {
            Ok(bitmap) => images.push(DynamicImage::ImageRgb8(bitmap.as_image().into_rgb8())),
            Err(e) => {
                tracing::warn!(error = %e, "page render failed; skipping page");
            }
        }
    }

    images
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn test_load_pages_single_image() {
        let img = GrayImage::from_pixel(8, 8, Luma([200]));
        let file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        img.save(file.path()).unwrap();

        let pages = load_pages(file.path(), 300);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].width(), 8);
    }

    #[test]
    fn test_load_pages_garbage_yields_zero_pages() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"this is not a document").unwrap();

        assert!(load_pages(file.path(), 300).is_empty());
    }

    #[test]
    fn test_load_pages_missing_file_yields_zero_pages() {
        assert!(load_pages(Path::new("/nonexistent/billfold-doc"), 300).is_empty());
    }

    #[test]
    fn test_load_pages_corrupt_image_yields_zero_pages() {
        // A valid PNG magic header with a truncated body sniffs as image/png
        // but fails to decode.
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00]).unwrap();

        assert!(load_pages(file.path(), 300).is_empty());
    }
}
