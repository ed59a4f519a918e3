//! Prompt templates for the slow path.

/// System message for row reconstruction.
pub const ROW_RECONSTRUCTION_SYSTEM: &str =
    "You are an expert at extracting structured bill data. Always return valid JSON.";

/// Build the row-reconstruction prompt for one page's raw text.
///
/// The instructions pin the output to a JSON array of
/// name/rate/quantity/amount objects and exclude subtotal/total rows.
pub fn row_reconstruction_prompt(text_segment: &str) -> String {
    format!(
        r#"You are an expert at extracting structured data from bill/invoice text.

Extract ALL line items from this bill text. Each line item should have:
- name: The product/service description
- rate: Price per unit (use 0.0 if not found)
- quantity: Quantity (use 1.0 if not found)
- amount: Total amount for this item (REQUIRED - this is the most important field)

IMPORTANT RULES:
1. Extract EVERY line item - don't skip any
2. amount is REQUIRED and must be a number
3. If you see subtotals or totals, DO NOT include them as line items
4. Return ONLY a valid JSON array, no explanations
5. If a field is missing, use reasonable defaults (0.0 for rate, 1.0 for quantity, but amount must be present)

Bill Text:
{text_segment}

Return a JSON array like this:
[
  {{"name": "Product 1", "rate": 10.0, "quantity": 2.0, "amount": 20.0}},
  {{"name": "Product 2", "rate": 15.0, "quantity": 1.0, "amount": 15.0}}
]

JSON array:"#
    )
}
