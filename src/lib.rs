//! Toolscout - tool finder search service
//!
//! This library exposes the search engine and its HTTP surface, enabling
//! integration tests and embedding the engine in other applications.

pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod search;
pub mod session;
pub mod state;

// Re-export key types for convenience
pub use catalog::{Catalog, ToolRecord};
pub use config::Config;
pub use error::{AppError, Result};
pub use handlers::{
    analytics_handler, categories_handler, clear_cache_handler, health_handler,
    popular_handler, ready_handler, search_handler, suggestions_handler,
};
pub use search::{
    AnalyticsSummary, EngineSettings, MatchType, SearchEngine, SearchOptions, SearchResult,
};
pub use session::{FixedSession, GeneratedSession, SessionProvider};
pub use state::AppState;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

/// Build the API router (without the metrics endpoint or middleware).
pub fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/search", post(search_handler))
        .route("/suggestions", get(suggestions_handler))
        .route("/popular", get(popular_handler))
        .route("/analytics", get(analytics_handler))
        .route("/cache", delete(clear_cache_handler))
        .route("/categories", get(categories_handler))
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .with_state(state)
}
