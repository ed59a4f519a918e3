//! Pipeline configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration for one extraction pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BillfoldConfig {
    pub ocr: OcrConfig,
    pub llm: LlmConfig,
    pub render: RenderConfig,
}

/// OCR engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    pub language: String,
    /// Tesseract page segmentation mode; 6 treats the page as a single
    /// uniform block, which suits tabular bills.
    pub psm: u8,
    /// Tokens at or below this confidence are excluded upstream.
    pub min_confidence: f64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            psm: 6,
            min_confidence: 0.0,
        }
    }
}

/// Completion service settings for the slow path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Override for the chat-completions base URL; the client default is
    /// used when absent.
    pub base_url: Option<String>,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.1,
            max_tokens: 4096,
        }
    }
}

/// PDF rasterization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub target_dpi: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { target_dpi: 300 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BillfoldConfig::default();
        assert_eq!(config.ocr.language, "eng");
        assert_eq!(config.ocr.psm, 6);
        assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
        assert_eq!(config.llm.temperature, 0.1);
        assert_eq!(config.llm.max_tokens, 4096);
        assert_eq!(config.render.target_dpi, 300);
    }

    #[test]
    fn test_partial_config_deserialization() {
        let config: BillfoldConfig = serde_json::from_str(r#"{"ocr": {"language": "deu"}}"#).unwrap();
        assert_eq!(config.ocr.language, "deu");
        assert_eq!(config.ocr.psm, 6);
        assert_eq!(config.llm.max_tokens, 4096);
    }
}
