//! Weighted substring search over the tool catalog.
//!
//! `SearchEngine` owns the result cache and the analytics log; scoring and
//! match classification are pure functions in `scoring`.

pub mod analytics;
pub mod cache;
pub mod engine;
pub mod options;
pub mod scoring;
pub mod types;

pub use analytics::{AnalyticsLog, AnalyticsSummary, SearchAnalyticsEntry};
pub use cache::ResultCache;
pub use engine::{EngineSettings, SearchEngine};
pub use options::{SearchOptions, DEFAULT_SUGGESTION_LIMIT};
pub use scoring::{match_type, score_tool};
pub use types::{MatchType, SearchResult};
