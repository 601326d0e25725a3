//! In-process cache for ranked search results.
//!
//! Entries expire lazily: age is checked on read, and every insert first
//! prunes expired entries before the LRU evicts the least recently used one.
//! Callers pass the current `Instant` so expiry is deterministic in tests.

use crate::search::types::SearchResult;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

pub const DEFAULT_TTL: Duration = Duration::from_secs(300);
pub const DEFAULT_MAX_ENTRIES: usize = 100;

struct CacheEntry {
    /// Full ranked list, before truncation to the caller's limit
    results: Vec<SearchResult>,
    inserted_at: Instant,
}

pub struct ResultCache {
    /// `None` when caching is disabled
    entries: Option<LruCache<String, CacheEntry>>,
    ttl: Duration,
}

impl ResultCache {
    /// A zero `ttl` or `max_entries` disables caching.
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        let entries = NonZeroUsize::new(max_entries)
            .filter(|_| !ttl.is_zero())
            .map(LruCache::new);

        Self { entries, ttl }
    }

    /// Live entry for `key`, refreshing its recency. Expired entries are dropped.
    pub fn get(&mut self, key: &str, now: Instant) -> Option<&[SearchResult]> {
        let ttl = self.ttl;
        let cache = self.entries.as_mut()?;

        let age = now.saturating_duration_since(cache.peek(key)?.inserted_at);
        if age >= ttl {
            cache.pop(key);
            return None;
        }

        cache.get(key).map(|entry| entry.results.as_slice())
    }

    pub fn insert(&mut self, key: String, results: Vec<SearchResult>, now: Instant) {
        self.prune_expired(now);

        if let Some(cache) = self.entries.as_mut() {
            if let Some((evicted, _)) = cache.push(
                key.clone(),
                CacheEntry {
                    results,
                    inserted_at: now,
                },
            ) {
                if evicted != key {
                    tracing::trace!(key = %evicted, "Evicted least recently used cache entry");
                }
            }
        }
    }

    fn prune_expired(&mut self, now: Instant) {
        let ttl = self.ttl;
        let Some(cache) = self.entries.as_mut() else {
            return;
        };

        let expired_keys: Vec<String> = cache
            .iter()
            .filter(|(_, entry)| now.saturating_duration_since(entry.inserted_at) >= ttl)
            .map(|(key, _)| key.clone())
            .collect();

        for key in expired_keys {
            cache.pop(&key);
        }
    }

    pub fn clear(&mut self) {
        if let Some(cache) = self.entries.as_mut() {
            cache.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, LruCache::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
