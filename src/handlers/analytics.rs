use crate::error::Result;
use crate::handlers::{ensure_ready, search::validate_limit};
use crate::search::AnalyticsSummary;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const DEFAULT_POPULAR_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
pub struct PopularParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct PopularResponse {
    pub queries: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    pub status: &'static str,
    pub evicted: usize,
}

/// GET /popular?limit= - Most frequent queries in the analytics window
pub async fn popular_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PopularParams>,
) -> Result<Json<PopularResponse>> {
    ensure_ready(&state)?;
    let limit = params.limit.unwrap_or(DEFAULT_POPULAR_LIMIT);
    validate_limit(limit)?;

    Ok(Json(PopularResponse {
        queries: state.engine.popular_searches(limit),
    }))
}

/// GET /analytics - Summary of the analytics window
pub async fn analytics_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AnalyticsSummary>> {
    ensure_ready(&state)?;
    Ok(Json(state.engine.analytics()))
}

/// DELETE /cache - Drop cached results (analytics are kept)
pub async fn clear_cache_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ClearCacheResponse>> {
    ensure_ready(&state)?;
    let evicted = state.engine.clear_cache();

    metrics::counter!("search_cache_clears_total").increment(1);

    Ok(Json(ClearCacheResponse {
        status: "cleared",
        evicted,
    }))
}
