//! Tesseract OCR backend.
//!
//! Spawns the `tesseract` binary and parses its word-level TSV output into
//! `OcrToken`s. Tesseract's TSV columns are
//! `level page_num block_num par_num line_num word_num left top width height conf text`;
//! word entries carry level 5.

use super::OcrEngine;
use crate::error::{BillfoldError, Result};
use crate::types::{BoundingBox, OcrToken};
use async_trait::async_trait;
use image::GrayImage;
use std::path::Path;
use tokio::process::Command;

const TSV_WORD_LEVEL: u32 = 5;
const TSV_MIN_FIELDS: usize = 12;

/// OCR backend backed by the system `tesseract` binary.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    language: String,
    psm: u8,
    min_confidence: f64,
}

impl TesseractOcr {
    pub fn new(language: impl Into<String>, psm: u8) -> Self {
        Self {
            language: language.into(),
            psm,
            min_confidence: 0.0,
        }
    }

    pub fn from_config(config: &crate::core::config::OcrConfig) -> Self {
        Self {
            language: config.language.clone(),
            psm: config.psm,
            min_confidence: config.min_confidence,
        }
    }

    async fn run_tesseract(&self, image_path: &Path, extra_args: &[&str]) -> Result<String> {
        let output = Command::new("tesseract")
            .arg(image_path)
            .arg("stdout")
            .args(["-l", &self.language])
            .args(["--psm", &self.psm.to_string()])
            .args(extra_args)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    BillfoldError::MissingDependency("tesseract binary not found in PATH".to_string())
                } else {
                    BillfoldError::ocr_with_source("failed to spawn tesseract", e)
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BillfoldError::ocr(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| BillfoldError::ocr_with_source("tesseract produced non-UTF8 output", e))
    }

    /// Write the page to a temporary PNG for tesseract to consume.
    ///
    /// The temp file is removed when the guard drops, on every exit path.
    fn write_temp_png(image: &GrayImage) -> Result<tempfile::NamedTempFile> {
        let file = tempfile::Builder::new().prefix("billfold-page-").suffix(".png").tempfile()?;
        image
            .save(file.path())
            .map_err(|e| BillfoldError::image_processing_with_source("failed to encode page image", e))?;
        Ok(file)
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new("eng", 6)
    }
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    async fn extract_text(&self, image: &GrayImage) -> Result<String> {
        let file = Self::write_temp_png(image)?;
        self.run_tesseract(file.path(), &[]).await
    }

    async fn extract_tokens(&self, image: &GrayImage) -> Result<Vec<OcrToken>> {
        let file = Self::write_temp_png(image)?;
        let tsv = self.run_tesseract(file.path(), &["tsv"]).await?;
        Ok(parse_tsv_tokens(&tsv, self.min_confidence))
    }
}

/// Parse Tesseract TSV output into tokens.
///
/// Keeps word-level rows with confidence strictly above `min_confidence`
/// and non-empty text; malformed lines are skipped.
pub fn parse_tsv_tokens(tsv: &str, min_confidence: f64) -> Vec<OcrToken> {
    let mut tokens = Vec::new();

    for (line_num, line) in tsv.lines().enumerate() {
        if line_num == 0 {
            continue;
        }

        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < TSV_MIN_FIELDS {
            continue;
        }

        let level = fields[0].parse::<u32>().unwrap_or(0);
        if level != TSV_WORD_LEVEL {
            continue;
        }

        let confidence = fields[10].parse::<f64>().unwrap_or(-1.0);
        if confidence <= min_confidence {
            continue;
        }

        let text = fields[11].trim();
        if text.is_empty() {
            continue;
        }

        tokens.push(OcrToken {
            text: text.to_string(),
            confidence,
            bbox: BoundingBox::new(
                fields[6].parse().unwrap_or(0),
                fields[7].parse().unwrap_or(0),
                fields[8].parse().unwrap_or(0),
                fields[9].parse().unwrap_or(0),
            ),
        });
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

    fn tsv(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }

    #[test]
    fn test_parse_tsv_basic() {
        let data = tsv(&[
            "5\t1\t0\t0\t0\t0\t100\t50\t80\t30\t95.5\tWidget",
            "5\t1\t0\t0\t0\t1\t190\t50\t70\t30\t92.3\t10.00",
        ]);

        let tokens = parse_tsv_tokens(&data, 0.0);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "Widget");
        assert_eq!(tokens[0].bbox.x, 100);
        assert_eq!(tokens[0].bbox.y, 50);
        assert_eq!(tokens[0].confidence, 95.5);
        assert_eq!(tokens[1].text, "10.00");
    }

    #[test]
    fn test_parse_tsv_confidence_filter() {
        // Tesseract reports -1 for non-word structural rows that slip
        // through at level 5; zero-confidence tokens are excluded too.
        let data = tsv(&[
            "5\t1\t0\t0\t0\t0\t100\t50\t80\t30\t-1\tnoise",
            "5\t1\t0\t0\t0\t1\t190\t50\t70\t30\t0\tnoise",
            "5\t1\t0\t0\t0\t2\t270\t50\t60\t30\t88.0\tkept",
        ]);

        let tokens = parse_tsv_tokens(&data, 0.0);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "kept");
    }

    #[test]
    fn test_parse_tsv_level_filter() {
        let data = tsv(&[
            "3\t1\t0\t0\t0\t0\t100\t50\t80\t30\t95.5\tParagraph",
            "4\t1\t0\t0\t0\t0\t100\t50\t80\t30\t95.5\tLine",
            "5\t1\t0\t0\t0\t0\t100\t50\t80\t30\t95.5\tWord",
        ]);

        let tokens = parse_tsv_tokens(&data, 0.0);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "Word");
    }

    #[test]
    fn test_parse_tsv_malformed_and_empty() {
        let data = tsv(&[
            "not a valid line",
            "5\t1\t0\t0\t0\t0\t100\t50\t80\t30\t95.5\t",
            "5\t1\t0\t0\t0\t1\t190\t50\t70\t30\t92.3\tWorld",
        ]);

        let tokens = parse_tsv_tokens(&data, 0.0);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "World");
    }
}
