use crate::catalog::CategoryCount;
use crate::error::Result;
use crate::handlers::ensure_ready;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryCount>,
}

/// GET /categories - Active tool counts per category, for the finder's filter
pub async fn categories_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CategoriesResponse>> {
    ensure_ready(&state)?;
    Ok(Json(CategoriesResponse {
        categories: state.engine.catalog().categories(),
    }))
}
