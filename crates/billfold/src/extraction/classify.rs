//! Keyword-based page classification.

use crate::types::PageType;

/// Label a page's content category from its full text.
///
/// Priority, first match wins: pharmacy keywords, then a final bill (both
/// "final" and "total" present), then the default detail category. Purely
/// presence-based, case-insensitive.
pub fn classify_page(text: &str) -> PageType {
    let lower = text.to_lowercase();

    if lower.contains("pharmacy") || lower.contains("medicine") || lower.contains("drug") {
        PageType::Pharmacy
    } else if lower.contains("final") && lower.contains("total") {
        PageType::FinalBill
    } else {
        PageType::BillDetail
    }
}
