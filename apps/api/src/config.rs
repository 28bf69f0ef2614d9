use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::analysis::tokenizer::TokenFilter;
use crate::analysis::AnalysisConfig;
use crate::upload::UploadPolicy;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_file_size_bytes: usize,
    pub min_description_chars: usize,
    pub allowed_extensions: Vec<String>,
    pub fuzzy_threshold: f64,
    pub keyword_limit: usize,
    pub suggestion_filter: TokenFilter,
}

impl Default for Config {
    fn default() -> Self {
        let analysis = AnalysisConfig::default();
        let upload = UploadPolicy::default();
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            max_file_size_bytes: upload.max_file_size_bytes,
            min_description_chars: upload.min_description_chars,
            allowed_extensions: upload.allowed_extensions,
            fuzzy_threshold: analysis.fuzzy_threshold,
            keyword_limit: analysis.keyword_limit,
            suggestion_filter: analysis.suggestion_filter,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let config = Config {
            port: parse_or("PORT", &lookup, defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            max_file_size_bytes: parse_or(
                "MAX_FILE_SIZE_BYTES",
                &lookup,
                defaults.max_file_size_bytes,
            )?,
            min_description_chars: parse_or(
                "MIN_DESCRIPTION_CHARS",
                &lookup,
                defaults.min_description_chars,
            )?,
            allowed_extensions: lookup("ALLOWED_EXTENSIONS")
                .map(|raw| parse_extensions(&raw))
                .unwrap_or(defaults.allowed_extensions),
            fuzzy_threshold: parse_or("FUZZY_THRESHOLD", &lookup, defaults.fuzzy_threshold)?,
            keyword_limit: parse_or("KEYWORD_LIMIT", &lookup, defaults.keyword_limit)?,
            suggestion_filter: lookup("SUGGESTION_TOKEN_FILTER")
                .map(|raw| parse_token_filter(&raw))
                .transpose()?
                .unwrap_or(defaults.suggestion_filter),
        };

        if !(0.0..=1.0).contains(&config.fuzzy_threshold) {
            bail!(
                "FUZZY_THRESHOLD must be between 0 and 1, got {}",
                config.fuzzy_threshold
            );
        }
        if config.keyword_limit == 0 {
            bail!("KEYWORD_LIMIT must be at least 1");
        }
        if config.allowed_extensions.is_empty() {
            bail!("ALLOWED_EXTENSIONS must list at least one extension");
        }

        Ok(config)
    }

    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            fuzzy_threshold: self.fuzzy_threshold,
            keyword_limit: self.keyword_limit,
            suggestion_filter: self.suggestion_filter,
        }
    }

    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy {
            max_file_size_bytes: self.max_file_size_bytes,
            min_description_chars: self.min_description_chars,
            allowed_extensions: self.allowed_extensions.clone(),
        }
    }
}

fn parse_or<T>(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

/// "pdf, .TXT" → [".pdf", ".txt"]
fn parse_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{ext}"))
        .collect()
}

fn parse_token_filter(raw: &str) -> Result<TokenFilter> {
    match raw.trim().to_lowercase().as_str() {
        "full" => Ok(TokenFilter::Full),
        "length_only" => Ok(TokenFilter::LengthOnly),
        other => bail!("SUGGESTION_TOKEN_FILTER must be 'full' or 'length_only', got '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::DEFAULT_ALLOWED_EXTENSIONS;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_reference_policy() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_file_size_bytes, 5_242_880);
        assert_eq!(config.min_description_chars, 50);
        assert_eq!(config.allowed_extensions, DEFAULT_ALLOWED_EXTENSIONS);
        assert_eq!(config.fuzzy_threshold, 0.8);
        assert_eq!(config.keyword_limit, 20);
        assert_eq!(config.suggestion_filter, TokenFilter::Full);
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "9000"),
            ("MAX_FILE_SIZE_BYTES", "1048576"),
            ("ALLOWED_EXTENSIONS", "PDF, .txt,,"),
            ("FUZZY_THRESHOLD", "0.9"),
            ("KEYWORD_LIMIT", "10"),
            ("SUGGESTION_TOKEN_FILTER", "length_only"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.max_file_size_bytes, 1_048_576);
        assert_eq!(config.allowed_extensions, vec![".pdf", ".txt"]);
        assert_eq!(config.analysis_config().fuzzy_threshold, 0.9);
        assert_eq!(config.analysis_config().keyword_limit, 10);
        assert_eq!(config.suggestion_filter, TokenFilter::LengthOnly);
        assert_eq!(config.upload_policy().max_file_size_bytes, 1_048_576);
    }

    #[test]
    fn test_invalid_port_fails() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_threshold_out_of_range_fails() {
        assert!(Config::from_lookup(lookup_from(&[("FUZZY_THRESHOLD", "1.5")])).is_err());
    }

    #[test]
    fn test_zero_keyword_limit_fails() {
        assert!(Config::from_lookup(lookup_from(&[("KEYWORD_LIMIT", "0")])).is_err());
    }

    #[test]
    fn test_unknown_token_filter_fails() {
        assert!(
            Config::from_lookup(lookup_from(&[("SUGGESTION_TOKEN_FILTER", "loose")])).is_err()
        );
    }
}
