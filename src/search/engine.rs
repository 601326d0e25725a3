//! The tool search engine: scoring, caching and analytics behind one handle.

use crate::catalog::Catalog;
use crate::search::analytics::{self, AnalyticsLog, AnalyticsSummary, SearchAnalyticsEntry};
use crate::search::cache::{self, ResultCache};
use crate::search::options::{cache_key, normalize_query, SearchOptions};
use crate::search::scoring::{match_type, score_tool};
use crate::search::types::SearchResult;
use crate::session::SessionProvider;
use std::cmp::Ordering;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Number of popular queries included in the analytics summary.
const SUMMARY_POPULAR_QUERIES: usize = 5;

/// Tunables for the cache and analytics log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub cache_ttl: Duration,
    pub cache_max_entries: usize,
    pub analytics_capacity: usize,
    /// Record an analytics entry for cache hits as well as misses
    pub record_cache_hits: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            cache_ttl: cache::DEFAULT_TTL,
            cache_max_entries: cache::DEFAULT_MAX_ENTRIES,
            analytics_capacity: analytics::DEFAULT_CAPACITY,
            record_cache_hits: false,
        }
    }
}

/// Ranks catalog tools against free-text queries.
///
/// The cache and the analytics log each sit behind their own mutex so one
/// engine can be shared across request handlers. Neither lock is held while
/// the other is taken.
pub struct SearchEngine {
    catalog: Arc<Catalog>,
    settings: EngineSettings,
    cache: Mutex<ResultCache>,
    analytics: Mutex<AnalyticsLog>,
    session: Arc<dyn SessionProvider>,
}

impl SearchEngine {
    pub fn new(
        catalog: Arc<Catalog>,
        settings: EngineSettings,
        session: Arc<dyn SessionProvider>,
    ) -> Self {
        Self {
            cache: Mutex::new(ResultCache::new(
                settings.cache_ttl,
                settings.cache_max_entries,
            )),
            analytics: Mutex::new(AnalyticsLog::new(settings.analytics_capacity)),
            catalog,
            settings,
            session,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Search using the engine's session provider for analytics.
    ///
    /// Whitespace-only queries return nothing and leave cache and analytics
    /// untouched.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchResult> {
        self.search_inner(query, options, None)
    }

    /// Search on behalf of an explicit session.
    pub fn search_as(
        &self,
        query: &str,
        options: &SearchOptions,
        session_id: &str,
    ) -> Vec<SearchResult> {
        self.search_inner(query, options, Some(session_id))
    }

    /// Autocomplete suggestions: a search with a raised minimum score.
    pub fn suggestions(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        self.search(query, &SearchOptions::suggestions(limit))
    }

    pub fn suggestions_as(&self, query: &str, limit: usize, session_id: &str) -> Vec<SearchResult> {
        self.search_as(query, &SearchOptions::suggestions(limit), session_id)
    }

    fn search_inner(
        &self,
        query: &str,
        options: &SearchOptions,
        session_id: Option<&str>,
    ) -> Vec<SearchResult> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let start = Instant::now();
        let normalized = normalize_query(query);
        let key = cache_key(&normalized, options);

        metrics::counter!("search_requests_total").increment(1);

        let cached = self
            .lock_cache()
            .get(&key, start)
            .map(|hit| (hit.len(), truncate(hit, options.limit)));

        if let Some((total, results)) = cached {
            metrics::counter!("search_cache_hits_total").increment(1);
            if self.settings.record_cache_hits {
                self.record(query, total, session_id);
            }
            tracing::debug!(query = %normalized, total, returned = results.len(), "Search served from cache");
            return results;
        }

        metrics::counter!("search_cache_misses_total").increment(1);

        let ranked = self.rank_normalized(&normalized, options);
        let total = ranked.len();
        let results = truncate(&ranked, options.limit);

        self.lock_cache().insert(key, ranked, start);
        self.record(query, total, session_id);

        let elapsed = start.elapsed();
        tracing::debug!(
            query = %normalized,
            total,
            returned = results.len(),
            elapsed_us = elapsed.as_micros() as u64,
            "Search completed"
        );

        metrics::histogram!("search_latency_us").record(elapsed.as_micros() as f64);
        metrics::histogram!("search_results_count").record(total as f64);

        results
    }

    /// Score and sort without touching the cache or analytics.
    ///
    /// Returns every candidate above `options.min_score`, ignoring `limit`.
    pub fn rank(&self, query: &str, options: &SearchOptions) -> Vec<SearchResult> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        self.rank_normalized(&normalize_query(query), options)
    }

    fn rank_normalized(&self, query: &str, options: &SearchOptions) -> Vec<SearchResult> {
        let mut results: Vec<SearchResult> = self
            .catalog
            .tools()
            .iter()
            .filter(|tool| tool.is_active && options.allows_category(&tool.category))
            .filter_map(|tool| {
                let score = score_tool(tool, query);
                (score > options.min_score).then(|| SearchResult {
                    tool: Arc::clone(tool),
                    score,
                    match_type: match_type(tool, query),
                })
            })
            .collect();

        results.sort_by(compare_results);
        results
    }

    fn record(&self, query: &str, results_count: usize, session_id: Option<&str>) {
        let session_id = session_id
            .map(str::to_string)
            .unwrap_or_else(|| self.session.session_id());

        self.lock_analytics()
            .record(SearchAnalyticsEntry::new(query, results_count, session_id));
    }

    /// Most frequent recorded queries, most frequent first.
    pub fn popular_searches(&self, limit: usize) -> Vec<String> {
        self.lock_analytics().popular(limit)
    }

    pub fn analytics(&self) -> AnalyticsSummary {
        self.lock_analytics().summary(SUMMARY_POPULAR_QUERIES)
    }

    /// Drop every cached result and return how many were dropped.
    /// Analytics are kept.
    pub fn clear_cache(&self) -> usize {
        let mut cache = self.lock_cache();
        let evicted = cache.len();
        cache.clear();
        tracing::info!(evicted, "Search cache cleared");
        evicted
    }

    pub fn cache_len(&self) -> usize {
        self.lock_cache().len()
    }

    fn lock_cache(&self) -> MutexGuard<'_, ResultCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_analytics(&self) -> MutexGuard<'_, AnalyticsLog> {
        self.analytics.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Score descending, then popularity descending, then id ascending, so the
/// order does not depend on catalog ordering.
fn compare_results(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| {
            b.tool
                .search_volume
                .unwrap_or(0)
                .cmp(&a.tool.search_volume.unwrap_or(0))
        })
        .then_with(|| a.tool.id.cmp(&b.tool.id))
}

fn truncate(results: &[SearchResult], limit: usize) -> Vec<SearchResult> {
    results.iter().take(limit).cloned().collect()
}
