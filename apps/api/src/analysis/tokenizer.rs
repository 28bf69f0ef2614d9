//! Tokenizer — normalises raw text into the filtered word sequence the
//! keyword extractor and matcher work on.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Which filters a token must survive besides the minimum length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenFilter {
    /// Length, stop-word and numeric filters.
    #[default]
    Full,
    /// Length filter only. Stop words and bare numbers are kept.
    LengthOnly,
}

/// Tokens must be strictly longer than this.
const MIN_TOKEN_LEN_EXCLUSIVE: usize = 2;

const STOP_WORD_LIST: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "back", "be",
    "because", "but", "by", "can", "come", "could", "day", "do", "even", "first", "for", "from",
    "get", "give", "go", "good", "has", "have", "he", "her", "him", "his", "how", "i", "if", "in",
    "into", "is", "it", "its", "just", "know", "like", "look", "make", "me", "most", "my", "new",
    "no", "not", "now", "of", "on", "one", "only", "or", "other", "our", "out", "over", "people",
    "say", "see", "she", "so", "some", "take", "than", "that", "the", "their", "them", "then",
    "there", "these", "they", "think", "this", "time", "to", "two", "up", "us", "use", "want",
    "was", "way", "we", "well", "what", "when", "which", "who", "will", "with", "work", "would",
    "year", "you", "your",
];

static STOP_WORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORD_LIST.iter().copied().collect());

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Tokenizes with the full filter set. See [`tokenize_with`].
pub fn tokenize(text: &str) -> Vec<String> {
    tokenize_with(text, TokenFilter::Full)
}

/// Lowercases `text`, blanks out everything that is not a word character
/// (`[A-Za-z0-9_]`) or whitespace, splits on whitespace runs and keeps the
/// tokens that pass `filter`. Order and duplicates are preserved.
pub fn tokenize_with(text: &str, filter: TokenFilter) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .filter(|token| keep_token(token, filter))
        .map(str::to_string)
        .collect()
}

fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

fn keep_token(token: &str, filter: TokenFilter) -> bool {
    // normalize() leaves only ASCII in tokens, so byte length == char length
    if token.len() <= MIN_TOKEN_LEN_EXCLUSIVE {
        return false;
    }
    match filter {
        TokenFilter::LengthOnly => true,
        TokenFilter::Full => !is_stop_word(token) && !is_numeric(token),
    }
}

fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}
