//! Matcher — decides which keywords a document covers, exactly or fuzzily.

use std::collections::HashSet;

use serde::Serialize;

pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;

/// Partition of a keyword list into covered and uncovered keywords.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    /// round(matched / total * 100); 0 when there are no keywords.
    pub score: u32,
}

/// Bigram Sørensen–Dice similarity in [0, 1]. Whitespace is ignored.
///
/// Symmetric, 1.0 for identical strings and 0.0 for strings sharing no
/// bigram. A non-finite comparison result counts as 0.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let score = strsim::sorensen_dice(a, b);
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// True when `keyword` is one of `document_tokens`, or some token is more
/// than `threshold` similar to it.
pub fn is_present(keyword: &str, document_tokens: &HashSet<String>, threshold: f64) -> bool {
    document_tokens.contains(keyword)
        || document_tokens
            .iter()
            .any(|token| similarity(keyword, token) > threshold)
}

/// Splits `keywords` into matched and missing, both in keyword order.
pub fn match_keywords(
    keywords: &[String],
    document_tokens: &HashSet<String>,
    threshold: f64,
) -> MatchResult {
    let (matched, missing): (Vec<String>, Vec<String>) = keywords
        .iter()
        .cloned()
        .partition(|keyword| is_present(keyword, document_tokens, threshold));

    let score = if keywords.is_empty() {
        0
    } else {
        ((matched.len() as f64 / keywords.len() as f64) * 100.0).round() as u32
    };

    MatchResult {
        matched,
        missing,
        score,
    }
}
