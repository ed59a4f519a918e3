//! Row-reconstruction and reconciliation core.
//!
//! Per page, tokens are clustered into visual rows ([`rows`]), each row is
//! parsed into a candidate line item ([`line_items`]), and the page text is
//! categorized ([`classify`]). Pages with no heuristic items take the slow
//! path through the LLM bridge ([`fallback`]). After all pages, near
//! duplicates are removed document-wide ([`dedup`]) and the reconstructed
//! sum is reconciled against the declared total ([`totals`]).

pub mod classify;
pub mod dedup;
pub mod fallback;
pub mod line_items;
pub mod rows;
pub mod totals;

pub use classify::classify_page;
pub use dedup::Deduplicator;
pub use fallback::FallbackBridge;
pub use line_items::parse_row;
pub use rows::{group_tokens, Row};
pub use totals::{extract_declared_total, validate_math};
