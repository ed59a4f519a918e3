//! LLM completion collaborator interface.
//!
//! The slow path depends on the `CompletionService` trait only. A failure
//! from this collaborator is never fatal: the fallback bridge recovers it
//! locally and the affected page simply yields no items.

mod groq;
pub mod prompts;

pub use groq::GroqClient;

use crate::error::Result;
use async_trait::async_trait;

/// Generated text plus the provider-reported token accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Trait for text-completion services.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Run one completion with the given sampling parameters.
    async fn complete(&self, prompt: &str, temperature: f64, max_tokens: u32) -> Result<Completion>;
}
