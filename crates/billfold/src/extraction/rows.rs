//! Visual row clustering of OCR tokens.
//!
//! Tokens are assigned to rows greedily in input order: a token joins the
//! first row whose anchor y (the y of the row's first token, not a running
//! average) lies within [`ROW_Y_THRESHOLD`] pixels of its own y, otherwise it
//! opens a new row. Anchor-based grouping is order dependent and can
//! misgroup rows whose first token is a vertical outlier; this is the
//! documented contract and must not be swapped for centroid grouping.

use crate::types::OcrToken;

/// Vertical band, in pixels, within which tokens share a row.
pub const ROW_Y_THRESHOLD: i64 = 10;

/// Tokens whose trimmed text is shorter than this are discarded before
/// grouping.
const MIN_TOKEN_CHARS: usize = 2;

/// An ordered sequence of tokens sharing an inferred vertical band.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// y of the first token placed in the row.
    pub anchor_y: u32,
    pub tokens: Vec<OcrToken>,
}

impl Row {
    /// Render the row as text: token texts joined by single spaces, in
    /// x order.
    pub fn text(&self) -> String {
        let parts: Vec<&str> = self.tokens.iter().map(|t| t.text.as_str()).collect();
        parts.join(" ")
    }
}

/// Cluster one page's tokens into rows.
///
/// Output rows are sorted ascending by anchor y and tokens within each row
/// ascending by x.
pub fn group_tokens(tokens: Vec<OcrToken>) -> Vec<Row> {
    let mut rows: Vec<Row> = Vec::new();

    for token in tokens {
        if token.text.trim().chars().count() < MIN_TOKEN_CHARS {
            continue;
        }

        let y = i64::from(token.bbox.y);
        match rows
            .iter_mut()
            .find(|row| (i64::from(row.anchor_y) - y).abs() < ROW_Y_THRESHOLD)
        {
            Some(row) => row.tokens.push(token),
            None => rows.push(Row {
                anchor_y: token.bbox.y,
                tokens: vec![token],
            }),
        }
    }

    rows.sort_by_key(|row| row.anchor_y);
    for row in &mut rows {
        row.tokens.sort_by_key(|token| token.bbox.x);
    }
    rows
}
