//! LLM slow path for pages the heuristics could not read.
//!
//! Triggered only when the fast path yields zero items for a page. Every
//! failure mode here (network, malformed response, unparseable JSON) is
//! recovered locally: the page gets an empty item list, the run continues,
//! nothing is retried.

use crate::llm::{prompts, CompletionService};
use crate::types::{coerce_json_number, LineItem, TokenUsage};
use std::sync::Arc;

/// Bridge between a zero-item page and the completion collaborator.
pub struct FallbackBridge {
    llm: Arc<dyn CompletionService>,
    temperature: f64,
    max_tokens: u32,
}

impl FallbackBridge {
    pub fn new(llm: Arc<dyn CompletionService>, temperature: f64, max_tokens: u32) -> Self {
        Self {
            llm,
            temperature,
            max_tokens,
        }
    }

    /// Reconstruct a page's line items from its raw text.
    ///
    /// Token usage is accrued for every successful completion call,
    /// regardless of how many valid items the response yields.
    pub async fn reconstruct(&self, page_text: &str, usage: &mut TokenUsage) -> Vec<LineItem> {
        let prompt = prompts::row_reconstruction_prompt(page_text);

        let completion = match self.llm.complete(&prompt, self.temperature, self.max_tokens).await {
            Ok(completion) => completion,
            Err(e) => {
                tracing::warn!(error = %e, "completion call failed; page yields no items");
                return Vec::new();
            }
        };

        usage.record(completion.input_tokens, completion.output_tokens);

        match parse_item_array(&completion.text) {
            Some(items) => items,
            None => {
                tracing::warn!("completion response carried no parseable item array");
                Vec::new()
            }
        }
    }
}

/// Salvage a JSON item array from model output.
///
/// Slices from the first `[` to the last `]` to tolerate surrounding
/// commentary, then keeps elements that are objects carrying both a name
/// and an amount key, coerce cleanly (rate defaults to 0.0, quantity to
/// 1.0), and end up with a non-empty name and a positive amount.
pub fn parse_item_array(content: &str) -> Option<Vec<LineItem>> {
    let start = content.find('[')?;
    let end = content.rfind(']')?;
    if end < start {
        return None;
    }

    let parsed: serde_json::Value = serde_json::from_str(&content[start..=end]).ok()?;
    let elements = parsed.as_array()?;

    let mut items = Vec::new();
    for element in elements {
        let Some(object) = element.as_object() else {
            continue;
        };

        let name_value = object.get("name").or_else(|| object.get("item_name"));
        let amount_value = object.get("amount").or_else(|| object.get("item_amount"));
        let (Some(name_value), Some(amount_value)) = (name_value, amount_value) else {
            continue;
        };

        let Some(name) = name_value.as_str().map(str::trim) else {
            continue;
        };

        let amount = coerce_json_number(Some(amount_value), 0.0);
        let rate = coerce_json_number(object.get("rate").or_else(|| object.get("item_rate")), 0.0);
        let quantity = coerce_json_number(object.get("quantity").or_else(|| object.get("item_quantity")), 1.0);

        if name.is_empty() || amount <= 0.0 {
            continue;
        }

        items.push(LineItem::new(name, rate, quantity, amount));
    }

    Some(items)
}
