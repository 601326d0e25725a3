//! Type definitions for the tool catalog.

use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// One catalog entry describing a calculator or converter page.
///
/// Records are supplied by the site configuration and are read-only to the
/// search engine. Field names follow the catalog's camelCase JSON layout
/// (`searchVolume`, `isActive`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolRecord {
    /// Unique identifier across the catalog
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Ordered search keywords; each one is scored independently
    #[serde(default)]
    pub keywords: Vec<String>,

    pub category: String,

    /// Popularity signal used for the ranking bonus
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_volume: Option<u64>,

    /// Difficulty rating, 1 (trivial) to 5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u8>,

    /// Inactive records never appear in search results
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl ToolRecord {
    /// Creates an active record with no popularity or difficulty data.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            keywords: Vec::new(),
            category: category.into(),
            search_volume: None,
            difficulty: None,
            is_active: true,
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_search_volume(mut self, volume: u64) -> Self {
        self.search_volume = Some(volume);
        self
    }

    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Number of active tools in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub tools: usize,
}
