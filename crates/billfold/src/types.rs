//! Domain types for bill extraction.
//!
//! The outward JSON field names (`item_name`, `item_rate`, ...) follow the
//! wire contract of the extraction API; internal code uses the short names.

use serde::{Deserialize, Serialize};

/// A recognized text fragment with its bounding box and confidence score,
/// as reported by the OCR collaborator.
///
/// Tokens reaching the pipeline are already filtered to confidence > 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrToken {
    pub text: String,
    /// Recognition confidence in the 0-100 range.
    pub confidence: f64,
    pub bbox: BoundingBox,
}

/// Axis-aligned bounding box in pixel coordinates (left, top, width, height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

/// One structured record of a billed product or service.
///
/// `amount` is the load-bearing field: an item is only retained anywhere
/// downstream when its amount is present and greater than zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "item_name")]
    pub name: String,
    #[serde(rename = "item_rate")]
    pub rate: f64,
    #[serde(rename = "item_quantity")]
    pub quantity: f64,
    /// Net amount for the item post discounts. Required and > 0.
    #[serde(rename = "item_amount")]
    pub amount: f64,
    /// Internal parsing confidence, never exposed on the wire.
    #[serde(skip, default = "default_confidence")]
    pub confidence: f64,
}

fn default_confidence() -> f64 {
    1.0
}

impl LineItem {
    pub fn new(name: impl Into<String>, rate: f64, quantity: f64, amount: f64) -> Self {
        Self {
            name: name.into(),
            rate,
            quantity,
            amount,
            confidence: 1.0,
        }
    }
}

/// Content category of a processed page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageType {
    #[serde(rename = "Bill Detail")]
    BillDetail,
    #[serde(rename = "Final Bill")]
    FinalBill,
    #[serde(rename = "Pharmacy")]
    Pharmacy,
}

impl Default for PageType {
    fn default() -> Self {
        PageType::BillDetail
    }
}

/// One processed page: its 1-based page number, content category, and the
/// line items reconstructed from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageData {
    pub page_no: String,
    pub page_type: PageType,
    pub bill_items: Vec<LineItem>,
}

/// The reconstructed document.
///
/// `total_amount` is the declared total extracted from the bill's text, not
/// a computed value; `calculated_total` derives the sum of retained item
/// amounts for reconciliation against it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub pages: Vec<PageData>,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub tax: f64,
    /// Declared total extracted from the document text (0.0 when absent).
    #[serde(default)]
    pub total_amount: f64,
}

impl Invoice {
    /// Flattened item view in page order, then row order.
    pub fn all_items(&self) -> impl Iterator<Item = &LineItem> {
        self.pages.iter().flat_map(|page| page.bill_items.iter())
    }

    /// Number of retained items across all pages.
    pub fn item_count(&self) -> usize {
        self.pages.iter().map(|page| page.bill_items.len()).sum()
    }

    /// Sum of retained item amounts.
    pub fn calculated_total(&self) -> f64 {
        self.all_items().map(|item| item.amount).sum()
    }
}

/// Language-model token accounting for one document run.
///
/// An explicit accumulator owned by the run and threaded `&mut` through
/// every completion call; never shared across concurrent runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
}

impl TokenUsage {
    /// Record one completion call's provider-reported counts.
    pub fn record(&mut self, input_tokens: u64, output_tokens: u64) {
        self.input_tokens += input_tokens;
        self.output_tokens += output_tokens;
        self.total_tokens += input_tokens + output_tokens;
    }
}

/// Payload of a successful extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedData {
    pub pagewise_line_items: Vec<PageData>,
    pub total_item_count: usize,
}

/// Tolerant numeric coercion for bill fields.
///
/// Accepts thousands separators, leading currency symbols, and blank values;
/// maps unparseable input to 0.0.
pub fn coerce_number(raw: &str) -> f64 {
    let cleaned = raw
        .trim()
        .trim_start_matches("Rs.")
        .trim_start_matches("Rs")
        .trim_start_matches("rs.")
        .trim_start_matches("rs")
        .trim_start_matches('₹')
        .trim_start_matches('$')
        .replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return 0.0;
    }
    cleaned.parse::<f64>().unwrap_or(0.0)
}

/// Coerce a JSON value into a bill number, falling back to `default` when
/// the field is missing, null, or unparseable.
pub fn coerce_json_number(value: Option<&serde_json::Value>, default: f64) -> f64 {
    match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(default),
        Some(serde_json::Value::String(s)) => {
            let parsed = coerce_number(s);
            if parsed == 0.0 && coerce_is_blank(s) {
                default
            } else {
                parsed
            }
        }
        _ => default,
    }
}

fn coerce_is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
