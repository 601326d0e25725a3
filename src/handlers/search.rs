//! Search and autocomplete handlers for the tool finder.
//!
//! Empty or whitespace-only queries are not an error: they return an empty
//! result list so the UI can render its empty state. Oversized queries and
//! out-of-range limits are rejected here, before they reach the engine.

use crate::error::{AppError, Result};
use crate::handlers::{ensure_ready, session_from_headers};
use crate::search::{SearchOptions, SearchResult, DEFAULT_SUGGESTION_LIMIT};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Longest accepted query, in characters
pub const MAX_QUERY_LENGTH: usize = 256;

/// Largest accepted result limit
pub const MAX_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Free-text query matched against tool names, descriptions and keywords
    pub query: String,
    /// `limit`, `minScore` and `categories`, all optional
    #[serde(flatten)]
    pub options: SearchOptions,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionsParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub count: usize,
}

impl From<Vec<SearchResult>> for SearchResponse {
    fn from(results: Vec<SearchResult>) -> Self {
        Self {
            count: results.len(),
            results,
        }
    }
}

/// POST /search - Rank catalog tools against a query.
///
/// # Flow
/// 1. Validate query length and limit
/// 2. Resolve the session (header, else the engine's provider)
/// 3. Serve from cache or score every active tool
pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>> {
    ensure_ready(&state)?;
    validate_query(&request.query)?;
    validate_limit(request.options.limit)?;

    let results = match session_from_headers(&headers) {
        Some(session_id) => state
            .engine
            .search_as(&request.query, &request.options, &session_id),
        None => state.engine.search(&request.query, &request.options),
    };

    tracing::info!(
        query = %request.query,
        limit = request.options.limit,
        returned = results.len(),
        "Search handled"
    );

    Ok(Json(results.into()))
}

/// GET /suggestions?q=&limit= - Live-typing autocomplete.
pub async fn suggestions_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<SuggestionsParams>,
) -> Result<Json<SearchResponse>> {
    ensure_ready(&state)?;
    validate_query(&params.q)?;
    let limit = params.limit.unwrap_or(DEFAULT_SUGGESTION_LIMIT);
    validate_limit(limit)?;

    let results = match session_from_headers(&headers) {
        Some(session_id) => state.engine.suggestions_as(&params.q, limit, &session_id),
        None => state.engine.suggestions(&params.q, limit),
    };

    tracing::debug!(query = %params.q, returned = results.len(), "Suggestions handled");

    Ok(Json(results.into()))
}

fn validate_query(query: &str) -> Result<()> {
    if query.chars().count() > MAX_QUERY_LENGTH {
        return Err(AppError::ValidationError(format!(
            "Query cannot exceed {} characters",
            MAX_QUERY_LENGTH
        )));
    }
    Ok(())
}

pub(crate) fn validate_limit(limit: usize) -> Result<()> {
    if limit == 0 {
        return Err(AppError::ValidationError(
            "limit must be at least 1".to_string(),
        ));
    }
    if limit > MAX_LIMIT {
        return Err(AppError::ValidationError(format!(
            "limit cannot exceed {}",
            MAX_LIMIT
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_query_length() {
        assert!(validate_query("").is_ok());
        assert!(validate_query(&"x".repeat(MAX_QUERY_LENGTH)).is_ok());
        assert!(validate_query(&"x".repeat(MAX_QUERY_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_limit_bounds() {
        assert!(validate_limit(0).is_err());
        assert!(validate_limit(1).is_ok());
        assert!(validate_limit(MAX_LIMIT).is_ok());
        assert!(validate_limit(MAX_LIMIT + 1).is_err());
    }

    #[test]
    fn test_request_options_flattened() {
        let request: SearchRequest = serde_json::from_str(
            r#"{ "query": "bmi", "limit": 3, "categories": ["health"] }"#,
        )
        .unwrap();

        assert_eq!(request.query, "bmi");
        assert_eq!(request.options.limit, 3);
        assert_eq!(request.options.min_score, 1);
        assert_eq!(request.options.categories, Some(vec!["health".to_string()]));
    }
}
