//! ATS analysis engine.
//!
//! Pure and synchronous: two strings in, one [`AnalysisResult`] out.
//! Pipeline: tokenize → rank description keywords → match against the
//! document → section heuristics and suggestions, merged into one record.
//! All vocabularies are process-wide statics, so an [`Analyzer`] can be
//! shared freely across request tasks.

pub mod keywords;
pub mod matcher;
pub mod sections;
pub mod suggestions;
pub mod tokenizer;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use keywords::{extract_keywords, DEFAULT_KEYWORD_LIMIT};
use matcher::{match_keywords, DEFAULT_FUZZY_THRESHOLD};
use sections::{analyze_sections, SectionSignals};
use suggestions::{generate_suggestions, Suggestion};
use tokenizer::{tokenize, TokenFilter};

/// Tunable engine policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// A document token counts as a fuzzy hit when similarity is strictly above this.
    pub fuzzy_threshold: f64,
    pub keyword_limit: usize,
    /// Document-token filter used by the missing-keywords suggestion.
    /// `Full` agrees with the headline score; `LengthOnly` is the looser legacy pass.
    pub suggestion_filter: TokenFilter,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            keyword_limit: DEFAULT_KEYWORD_LIMIT,
            suggestion_filter: TokenFilter::Full,
        }
    }
}

/// Result of one analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_score: u32, // 0 – 100
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub sections: SectionSignals,
    pub suggestions: Vec<Suggestion>,
    /// Character count of the raw document.
    pub resume_length: usize,
    /// Whitespace-separated words in the raw document. Leading and trailing
    /// whitespace does not produce empty words.
    pub word_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Scores `document` against `description`.
    ///
    /// Fails only with [`AppError::EmptyExtractedText`] when the document is
    /// empty or whitespace-only. An empty description is allowed and yields
    /// a score of 0 with no keywords.
    pub fn analyze(&self, document: &str, description: &str) -> Result<AnalysisResult, AppError> {
        if is_blank(document) {
            return Err(AppError::EmptyExtractedText);
        }

        let keywords = extract_keywords(description, self.config.keyword_limit);
        let document_tokens: HashSet<String> = tokenize(document).into_iter().collect();
        let matches = match_keywords(&keywords, &document_tokens, self.config.fuzzy_threshold);

        let sections = analyze_sections(document);
        let suggestions = generate_suggestions(document, description, &self.config);

        debug!(
            keywords = keywords.len(),
            document_tokens = document_tokens.len(),
            matched = matches.matched.len(),
            score = matches.score,
            suggestions = suggestions.len(),
            "Analysis complete"
        );

        Ok(AnalysisResult {
            overall_score: matches.score,
            matched_keywords: matches.matched,
            missing_keywords: matches.missing,
            sections,
            suggestions,
            resume_length: document.chars().count(),
            word_count: document.split_whitespace().count(),
        })
    }
}

/// Whitespace-only, counting a byte-order mark as whitespace.
fn is_blank(text: &str) -> bool {
    text.chars().all(|c| c.is_whitespace() || c == '\u{FEFF}')
}
