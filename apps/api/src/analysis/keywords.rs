//! Keyword extraction — ranks description tokens by frequency.

use std::collections::HashMap;

use serde::Serialize;

use crate::analysis::tokenizer::tokenize;

pub const DEFAULT_KEYWORD_LIMIT: usize = 20;

/// A distinct description token and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordEntry {
    pub keyword: String,
    pub frequency: u32,
}

/// Counts every distinct token of `description`, ordered by descending
/// frequency. Equal counts keep first-occurrence order.
pub fn rank_keywords(description: &str) -> Vec<KeywordEntry> {
    let mut entries: Vec<KeywordEntry> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for token in tokenize(description) {
        match index.get(&token) {
            Some(&i) => entries[i].frequency += 1,
            None => {
                index.insert(token.clone(), entries.len());
                entries.push(KeywordEntry {
                    keyword: token,
                    frequency: 1,
                });
            }
        }
    }

    // sort_by is stable: ties stay in insertion order
    entries.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    entries
}

/// The top `limit` keywords of `description`, counts discarded.
pub fn extract_keywords(description: &str, limit: usize) -> Vec<String> {
    rank_keywords(description)
        .into_iter()
        .take(limit)
        .map(|entry| entry.keyword)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_empty_description_yields_no_keywords() {
        assert!(extract_keywords("", DEFAULT_KEYWORD_LIMIT).is_empty());
        assert!(extract_keywords("the and of", DEFAULT_KEYWORD_LIMIT).is_empty());
    }

    #[test]
    fn test_orders_by_descending_frequency() {
        let keywords = extract_keywords("rust kafka rust python rust kafka", 20);
        assert_eq!(keywords, vec!["rust", "kafka", "python"]);
    }

    #[test]
    fn test_ties_keep_first_occurrence_order() {
        let keywords = extract_keywords("beta alpha gamma alpha beta delta", 20);
        assert_eq!(keywords, vec!["beta", "alpha", "gamma", "delta"]);
    }

    #[test]
    fn test_caps_at_limit_and_entries_are_distinct() {
        let description: String = (0..30)
            .map(|i| format!("skill{i} skill{i} "))
            .collect();
        let keywords = extract_keywords(&description, DEFAULT_KEYWORD_LIMIT);
        assert_eq!(keywords.len(), DEFAULT_KEYWORD_LIMIT);
        let distinct: HashSet<_> = keywords.iter().collect();
        assert_eq!(distinct.len(), keywords.len());
        assert_eq!(keywords[0], "skill0");
        assert_eq!(keywords[19], "skill19");
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let description = "Senior backend engineer: Rust, Postgres, Kubernetes. \
                           Rust services on Kubernetes; Postgres tuning; observability.";
        let first = extract_keywords(description, 20);
        for _ in 0..10 {
            assert_eq!(extract_keywords(description, 20), first);
        }
    }

    #[test]
    fn test_rank_keywords_reports_frequencies() {
        let ranked = rank_keywords("react react node");
        assert_eq!(
            ranked,
            vec![
                KeywordEntry {
                    keyword: "react".to_string(),
                    frequency: 2
                },
                KeywordEntry {
                    keyword: "node".to_string(),
                    frequency: 1
                },
            ]
        );
    }
}
