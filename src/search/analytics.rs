//! Bounded in-memory log of searches and the summaries derived from it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};

pub const DEFAULT_CAPACITY: usize = 1000;

/// One recorded search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchAnalyticsEntry {
    /// Query exactly as submitted
    pub query: String,
    pub timestamp: DateTime<Utc>,
    /// Total matches before truncation to the caller's limit
    pub results_count: usize,
    pub session_id: String,
}

impl SearchAnalyticsEntry {
    pub fn new(query: impl Into<String>, results_count: usize, session_id: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            timestamp: Utc::now(),
            results_count,
            session_id: session_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_searches: usize,
    pub unique_queries: usize,
    pub average_results: f64,
    pub popular_queries: Vec<String>,
}

/// Append-only log holding at most `capacity` entries, oldest dropped first.
pub struct AnalyticsLog {
    entries: VecDeque<SearchAnalyticsEntry>,
    capacity: usize,
}

impl AnalyticsLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity,
        }
    }

    pub fn record(&mut self, entry: SearchAnalyticsEntry) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Most frequent queries, ties broken alphabetically.
    pub fn popular(&self, limit: usize) -> Vec<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for entry in &self.entries {
            *counts.entry(entry.query.as_str()).or_default() += 1;
        }

        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        ranked
            .into_iter()
            .take(limit)
            .map(|(query, _)| query.to_string())
            .collect()
    }

    /// Summary statistics; `top` bounds the popular query list.
    pub fn summary(&self, top: usize) -> AnalyticsSummary {
        let total_searches = self.entries.len();
        let unique_queries = self
            .entries
            .iter()
            .map(|e| e.query.as_str())
            .collect::<std::collections::HashSet<_>>()
            .len();
        let average_results = if total_searches == 0 {
            0.0
        } else {
            self.entries.iter().map(|e| e.results_count).sum::<usize>() as f64
                / total_searches as f64
        };

        AnalyticsSummary {
            total_searches,
            unique_queries,
            average_results,
            popular_queries: self.popular(top),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &SearchAnalyticsEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AnalyticsLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
