//! Suggestion generator — fixed rules evaluated in a fixed order, each
//! appending at most one suggestion.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::keywords::extract_keywords;
use crate::analysis::matcher::match_keywords;
use crate::analysis::sections::contains_any;
use crate::analysis::tokenizer::tokenize_with;
use crate::analysis::AnalysisConfig;

const MIN_RECOMMENDED_CHARS: usize = 1000;
const MAX_RECOMMENDED_CHARS: usize = 5000;

/// How many missing keywords are named in the description text.
const MISSING_IN_DESCRIPTION: usize = 5;
/// How many missing keywords are carried in `keywords`.
const MISSING_IN_KEYWORDS: usize = 10;
const ILLUSTRATIVE_VERB_COUNT: usize = 10;

const ACTION_VERBS: &[&str] = &[
    "developed",
    "implemented",
    "managed",
    "created",
    "designed",
    "analyzed",
    "improved",
    "increased",
    "decreased",
    "coordinated",
    "led",
    "supervised",
    "trained",
    "maintained",
    "optimized",
];

const QUANTIFIABLE_EXAMPLES: &[&str] = &[
    "metrics",
    "percentages",
    "numbers",
    "results",
    "achievements",
];

static QUANTIFIABLE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"[0-9]+%",
        r"\$[0-9]+",
        r"(?i)[0-9]+\s*(?:increase|decrease|improvement|growth)",
        r"(?i)[0-9]+\s*(?:people|team|clients|customers)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid quantifiable pattern"))
    .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    MissingKeywords,
    Length,
    ActionVerbs,
    Quantifiable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    // No built-in rule emits Low yet; clients still render it.
    #[allow(dead_code)]
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
}

/// Runs every rule against `document` and `description` in order:
/// missing keywords, length, action verbs, quantifiable achievements.
pub fn generate_suggestions(
    document: &str,
    description: &str,
    config: &AnalysisConfig,
) -> Vec<Suggestion> {
    [
        missing_keywords_rule(document, description, config),
        length_rule(document),
        action_verbs_rule(document),
        quantifiable_rule(document),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn missing_keywords_rule(
    document: &str,
    description: &str,
    config: &AnalysisConfig,
) -> Option<Suggestion> {
    let keywords = extract_keywords(description, config.keyword_limit);
    let document_tokens: HashSet<String> = tokenize_with(document, config.suggestion_filter)
        .into_iter()
        .collect();
    let missing = match_keywords(&keywords, &document_tokens, config.fuzzy_threshold).missing;

    if missing.is_empty() {
        return None;
    }

    let named: Vec<&str> = missing
        .iter()
        .take(MISSING_IN_DESCRIPTION)
        .map(String::as_str)
        .collect();

    Some(Suggestion {
        kind: SuggestionKind::MissingKeywords,
        priority: Priority::High,
        title: "Add Missing Keywords".to_string(),
        description: format!(
            "Consider adding these important keywords from the job description: {}",
            named.join(", ")
        ),
        keywords: missing.into_iter().take(MISSING_IN_KEYWORDS).collect(),
    })
}

fn length_rule(document: &str) -> Option<Suggestion> {
    let length = document.chars().count();

    let (title, description) = if length < MIN_RECOMMENDED_CHARS {
        (
            "Resume Too Short",
            "Your resume appears to be quite short. Consider adding more details about your experience, skills, and achievements.",
        )
    } else if length > MAX_RECOMMENDED_CHARS {
        (
            "Resume Too Long",
            "Your resume is quite long. Consider condensing it to focus on the most relevant information for this position.",
        )
    } else {
        return None;
    };

    Some(Suggestion {
        kind: SuggestionKind::Length,
        priority: Priority::Medium,
        title: title.to_string(),
        description: description.to_string(),
        keywords: vec![],
    })
}

fn action_verbs_rule(document: &str) -> Option<Suggestion> {
    if contains_any(&document.to_lowercase(), ACTION_VERBS) {
        return None;
    }

    Some(Suggestion {
        kind: SuggestionKind::ActionVerbs,
        priority: Priority::Medium,
        title: "Use Action Verbs".to_string(),
        description:
            "Consider using more action verbs to make your resume more dynamic and impactful."
                .to_string(),
        keywords: ACTION_VERBS
            .iter()
            .take(ILLUSTRATIVE_VERB_COUNT)
            .map(|v| v.to_string())
            .collect(),
    })
}

fn quantifiable_rule(document: &str) -> Option<Suggestion> {
    if has_quantifiable_achievement(document) {
        return None;
    }

    Some(Suggestion {
        kind: SuggestionKind::Quantifiable,
        priority: Priority::Medium,
        title: "Add Quantifiable Achievements".to_string(),
        description: "Include specific numbers, percentages, and metrics to demonstrate your impact and achievements.".to_string(),
        keywords: QUANTIFIABLE_EXAMPLES.iter().map(|k| k.to_string()).collect(),
    })
}

pub fn has_quantifiable_achievement(text: &str) -> bool {
    QUANTIFIABLE_PATTERNS.iter().any(|re| re.is_match(text))
}
