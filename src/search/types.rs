//! Result types produced by the search engine.

use crate::catalog::ToolRecord;
use serde::Serialize;
use std::sync::Arc;

/// Coarse classification of why a tool matched a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Prefix,
    Contains,
    Keyword,
    Description,
}

/// One ranked hit. Created fresh per search and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub tool: Arc<ToolRecord>,
    /// Relevance score; only comparable within one catalog version
    pub score: u32,
    pub match_type: MatchType,
}
