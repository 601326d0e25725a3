//! Search options and cache key construction.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: usize = 10;
pub const DEFAULT_MIN_SCORE: u32 = 1;

/// Minimum score for autocomplete suggestions.
pub const SUGGESTION_MIN_SCORE: u32 = 10;
pub const DEFAULT_SUGGESTION_LIMIT: usize = 6;

/// Constraints applied to a single search.
///
/// Missing fields take their defaults when deserialized, so `{}` is a valid
/// options document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchOptions {
    /// Maximum number of results returned (default: 10)
    pub limit: usize,
    /// Results must score strictly above this value (default: 1)
    pub min_score: u32,
    /// Optional category allow-list; `None` searches every category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            min_score: DEFAULT_MIN_SCORE,
            categories: None,
        }
    }
}

impl SearchOptions {
    /// Options used by live-typing autocomplete.
    pub fn suggestions(limit: usize) -> Self {
        Self {
            limit,
            min_score: SUGGESTION_MIN_SCORE,
            categories: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_min_score(mut self, min_score: u32) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    /// Whether a tool in `category` passes the allow-list.
    pub fn allows_category(&self, category: &str) -> bool {
        self.categories
            .as_ref()
            .map_or(true, |allowed| allowed.iter().any(|c| c == category))
    }
}

/// Lowercase a raw query. Surrounding whitespace is kept and takes part
/// in matching.
pub fn normalize_query(query: &str) -> String {
    query.to_lowercase()
}

/// Cache key: normalized query plus the serialized options.
pub fn cache_key(normalized_query: &str, options: &SearchOptions) -> String {
    let serialized = serde_json::to_string(options).unwrap_or_default();
    format!("{}:{}", normalized_query, serialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SearchOptions::default();
        assert_eq!(options.limit, 10);
        assert_eq!(options.min_score, 1);
        assert!(options.categories.is_none());
    }

    #[test]
    fn test_deserialize_partial_uses_defaults() {
        let options: SearchOptions = serde_json::from_str(r#"{ "minScore": 50 }"#).unwrap();
        assert_eq!(options.limit, DEFAULT_LIMIT);
        assert_eq!(options.min_score, 50);
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("BMI Calculator"), "bmi calculator");
        assert_eq!(normalize_query(" Tip "), " tip ");
    }

    #[test]
    fn test_cache_key_differs_by_options() {
        let base = SearchOptions::default();
        let limited = SearchOptions::default().with_limit(3);
        let filtered = SearchOptions::default().with_categories(["health"]);

        let keys = [
            cache_key("bmi", &base),
            cache_key("bmi", &limited),
            cache_key("bmi", &filtered),
        ];

        assert_ne!(keys[0], keys[1]);
        assert_ne!(keys[0], keys[2]);
        assert_eq!(keys[0], cache_key("bmi", &SearchOptions::default()));
    }

    #[test]
    fn test_allows_category() {
        let options = SearchOptions::default().with_categories(["health", "finance"]);
        assert!(options.allows_category("health"));
        assert!(!options.allows_category("automotive"));
        assert!(SearchOptions::default().allows_category("anything"));
    }
}
