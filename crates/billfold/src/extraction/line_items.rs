//! Heuristic row-to-item parsing.
//!
//! The numeric role assignment is a fixed heuristic, intentionally rigid in
//! multi-column layouts: the last number is the amount, the first is the
//! quantity when at least two numbers exist, the second is the rate when at
//! least three exist. Changing it is a contract change, not a bug fix.

use crate::types::{coerce_number, LineItem};
use once_cell::sync::Lazy;
use regex::Regex;

/// Rows containing any of these keywords are header/total lines, never items.
const HEADER_KEYWORDS: [&str; 7] = ["description", "item", "qty", "rate", "amount", "total", "subtotal"];

/// Integer or decimal numeric substrings, left to right.
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.?\d*").expect("numeric pattern is valid"));

/// Parse one row's joined text into a candidate line item.
///
/// Returns `None` for header/total rows, rows without numbers, rows whose
/// residual name is shorter than 3 characters, and rows whose amount does
/// not coerce to a positive number.
pub fn parse_row(row_text: &str) -> Option<LineItem> {
    let lower = row_text.to_lowercase();
    if HEADER_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
        return None;
    }

    let numbers: Vec<&str> = NUMBER_RE.find_iter(row_text).map(|m| m.as_str()).collect();
    if numbers.is_empty() {
        return None;
    }

    let amount = coerce_number(numbers[numbers.len() - 1]);
    let quantity = if numbers.len() >= 2 { coerce_number(numbers[0]) } else { 1.0 };
    let rate = if numbers.len() >= 3 { coerce_number(numbers[1]) } else { amount };

    let name = NUMBER_RE.replace_all(row_text, "").trim().to_string();
    if name.chars().count() < 3 {
        return None;
    }

    // Items are only retained downstream with a positive amount.
    if amount <= 0.0 {
        return None;
    }

    Some(LineItem::new(name, rate, quantity, amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_number_row() {
        let item = parse_row("Widget 10.00").unwrap();
        assert_eq!(item.name, "Widget");
        assert_eq!(item.quantity, 1.0);
        assert_eq!(item.rate, 10.0);
        assert_eq!(item.amount, 10.0);
    }

    #[test]
    fn test_three_number_row() {
        let item = parse_row("Widget 2 10.00 20.00").unwrap();
        assert_eq!(item.name, "Widget");
        assert_eq!(item.quantity, 2.0);
        assert_eq!(item.rate, 10.0);
        assert_eq!(item.amount, 20.0);
    }

    #[test]
    fn test_two_number_row() {
        let item = parse_row("Consultation 3 450.00").unwrap();
        assert_eq!(item.quantity, 3.0);
        assert_eq!(item.rate, 450.0);
        assert_eq!(item.amount, 450.0);
    }

    #[test]
    fn test_header_row_rejected() {
        assert!(parse_row("Description Qty Rate Amount").is_none());
        assert!(parse_row("SUBTOTAL 120.00").is_none());
    }

    #[test]
    fn test_row_without_numbers_rejected() {
        assert!(parse_row("Thank you for your visit").is_none());
    }

    #[test]
    fn test_short_residual_name_rejected() {
        assert!(parse_row("ab 10.00").is_none());
        assert!(parse_row("12.50 9.00").is_none());
    }

    #[test]
    fn test_zero_amount_rejected() {
        assert!(parse_row("Waived charge 0").is_none());
    }
}
