//! Pipeline orchestration: configuration, document input, page
//! preprocessing, and the per-document run.

pub mod config;
pub mod input;
pub mod pipeline;
pub mod preprocess;

pub use config::{BillfoldConfig, LlmConfig, OcrConfig};
pub use pipeline::{ExtractionPipeline, RunReport};
