//! Declared-total extraction and reconciliation.

use crate::types::Invoice;
use once_cell::sync::Lazy;
use regex::Regex;

/// Tolerance for the declared-vs-calculated comparison, in currency units.
const MATH_TOLERANCE: f64 = 0.05;

/// Ordered total patterns; the first one matching anywhere in the text wins.
static TOTAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)(?:grand\s+)?total[:\s]+(?:rs\.?|₹|\$)?\s*(\d+(?:,\d{3})*(?:\.\d{2})?)")
            .expect("total pattern is valid"),
        Regex::new(r"(?i)(?:net\s+)?amount[:\s]+(?:rs\.?|₹|\$)?\s*(\d+(?:,\d{3})*(?:\.\d{2})?)")
            .expect("amount pattern is valid"),
    ]
});

/// Extract the declared total from page text.
///
/// Thousands separators are stripped before parsing; a pattern whose capture
/// fails to parse falls through to the next pattern; no match yields 0.0.
pub fn extract_declared_total(text: &str) -> f64 {
    for pattern in TOTAL_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(text) {
            let raw = captures[1].replace(',', "");
            if let Ok(value) = raw.parse::<f64>() {
                return value;
            }
        }
    }
    0.0
}

/// Reconcile the computed item sum against the declared total.
///
/// Fails immediately when no total was declared (0.0); otherwise passes iff
/// the absolute difference is below the tolerance.
pub fn validate_math(invoice: &Invoice) -> bool {
    if invoice.total_amount == 0.0 {
        return false;
    }
    (invoice.calculated_total() - invoice.total_amount).abs() < MATH_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LineItem, PageData, PageType};

    fn invoice_with(amounts: &[f64], declared: f64) -> Invoice {
        Invoice {
            pages: vec![PageData {
                page_no: "1".to_string(),
                page_type: PageType::FinalBill,
                bill_items: amounts
                    .iter()
                    .map(|a| LineItem::new(format!("Item {a}"), *a, 1.0, *a))
                    .collect(),
            }],
            total_amount: declared,
            ..Default::default()
        }
    }

    #[test]
    fn test_grand_total_with_currency_and_thousands() {
        assert_eq!(extract_declared_total("Grand Total: Rs. 1,234.56"), 1234.56);
    }

    #[test]
    fn test_plain_total() {
        assert_eq!(extract_declared_total("TOTAL 450.00 thank you"), 450.0);
    }

    #[test]
    fn test_amount_pattern_is_second_choice() {
        assert_eq!(extract_declared_total("Net Amount: ₹ 2,000"), 2000.0);
        // When both appear, the total pattern wins.
        assert_eq!(extract_declared_total("Net Amount: 99.00\nGrand Total: 100.00"), 100.0);
    }

    #[test]
    fn test_no_match_yields_zero() {
        assert_eq!(extract_declared_total("no totals here"), 0.0);
        assert_eq!(extract_declared_total(""), 0.0);
    }

    #[test]
    fn test_validate_math_within_tolerance() {
        let invoice = invoice_with(&[1234.52], 1234.56);
        assert!(validate_math(&invoice));
    }

    #[test]
    fn test_validate_math_outside_tolerance() {
        let invoice = invoice_with(&[1234.56], 1235.00);
        assert!(!validate_math(&invoice));
    }

    #[test]
    fn test_validate_math_fails_without_declared_total() {
        let invoice = invoice_with(&[100.0], 0.0);
        assert!(!validate_math(&invoice));
    }
}
