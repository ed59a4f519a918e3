//! Error types for billfold.
//!
//! All fatal failures use `BillfoldError`. The pipeline distinguishes two
//! failure channels:
//!
//! - **Fatal** (this module): download/transport failures and OCR failures
//!   abort the whole document run and surface as the `error` field of the
//!   run report.
//! - **Degrade-and-continue**: LLM completion failures and per-item coercion
//!   failures are recovered where they occur (empty page items, skipped
//!   item) and never become a `BillfoldError`.
//!
//! Unreadable or unsupported document bytes are not an error at all: page
//! decoding yields zero pages and the run proceeds.

use thiserror::Error;

/// Result type alias using `BillfoldError`.
pub type Result<T> = std::result::Result<T, BillfoldError>;

/// Main error type for all billfold operations.
#[derive(Debug, Error)]
pub enum BillfoldError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Fetch error: {message}")]
    Fetch {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("OCR error: {message}")]
    Ocr {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("LLM error: {message}")]
    Llm {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Image processing error: {message}")]
    ImageProcessing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for BillfoldError {
    fn from(err: serde_json::Error) -> Self {
        BillfoldError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident, $with_source:ident) => {
        /// Create the error from a message.
        pub fn $name<S: Into<String>>(message: S) -> Self {
            Self::$variant {
                message: message.into(),
                source: None,
            }
        }

        /// Create the error from a message and an underlying source.
        pub fn $with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
            message: S,
            source: E,
        ) -> Self {
            Self::$variant {
                message: message.into(),
                source: Some(Box::new(source)),
            }
        }
    };
}

impl BillfoldError {
    error_constructor!(fetch, Fetch, fetch_with_source);
    error_constructor!(ocr, Ocr, ocr_with_source);
    error_constructor!(llm, Llm, llm_with_source);
    error_constructor!(image_processing, ImageProcessing, image_processing_with_source);
    error_constructor!(serialization, Serialization, serialization_with_source);
    error_constructor!(validation, Validation, validation_with_source);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BillfoldError = io_err.into();
        assert!(matches!(err, BillfoldError::Io(_)));
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_fetch_error() {
        let err = BillfoldError::fetch("connection refused");
        assert_eq!(err.to_string(), "Fetch error: connection refused");
    }

    #[test]
    fn test_ocr_error_with_source() {
        let source = std::io::Error::other("tesseract exited with status 1");
        let err = BillfoldError::ocr_with_source("OCR failed", source);
        assert_eq!(err.to_string(), "OCR error: OCR failed");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: BillfoldError = json_err.into();
        assert!(matches!(err, BillfoldError::Serialization { .. }));
    }

    #[test]
    fn test_missing_dependency_error() {
        let err = BillfoldError::MissingDependency("tesseract not found".to_string());
        assert_eq!(err.to_string(), "Missing dependency: tesseract not found");
    }

    #[test]
    fn test_io_error_bubbles_unchanged() {
        fn read_file() -> Result<String> {
            let content = std::fs::read_to_string("/nonexistent/billfold-test-file")?;
            Ok(content)
        }

        let result = read_file();
        assert!(matches!(result.unwrap_err(), BillfoldError::Io(_)));
    }
}
