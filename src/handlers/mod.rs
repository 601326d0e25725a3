pub mod analytics;
pub mod catalog;
pub mod health;
pub mod search;

pub use analytics::{analytics_handler, clear_cache_handler, popular_handler};
pub use catalog::categories_handler;
pub use health::{health_handler, ready_handler};
pub use search::{search_handler, suggestions_handler};

use crate::error::{AppError, Result};
use crate::state::AppState;
use axum::http::HeaderMap;

/// Request header carrying the browser's session id.
pub const SESSION_HEADER: &str = "x-session-id";

/// Reject requests until startup warmup has finished.
fn ensure_ready(state: &AppState) -> Result<()> {
    if state.is_ready() {
        Ok(())
    } else {
        Err(AppError::ResourceError(
            "Search engine is still starting".to_string(),
        ))
    }
}

/// Non-empty session id from the request headers, if any.
fn session_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
