use crate::search::EngineSettings;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Analytics recording preset.
/// Controls whether cache hits are counted as searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsMode {
    /// Only cache misses are recorded; repeated queries inside the TTL count once.
    Strict,
    /// Every non-empty search is recorded, cached or not.
    Complete,
    /// Use the `RECORD_CACHE_HITS` environment variable.
    Custom,
}

impl AnalyticsMode {
    pub fn from_env() -> Self {
        match env::var("TOOLSCOUT_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "strict" | "misses-only" => Self::Strict,
            "complete" | "all-searches" => Self::Complete,
            _ => Self::Custom,
        }
    }
}

pub struct Config {
    pub host: String,
    pub port: u16,
    /// JSON file holding the tool catalog.
    pub catalog_path: PathBuf,
    pub shutdown_timeout_secs: u64,
    /// Seconds a cached result list stays valid. 0 disables the cache.
    pub cache_ttl_secs: u64,
    /// Cached queries kept before least-recently-used eviction.
    pub cache_max_entries: usize,
    /// Analytics entries kept before the oldest are dropped.
    pub analytics_capacity: usize,
    pub record_cache_hits: bool,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// `TOOLSCOUT_MODE` overrides `RECORD_CACHE_HITS`:
    /// - `strict`: analytics only on cache misses
    /// - `complete`: analytics on every search
    pub fn from_env() -> anyhow::Result<Self> {
        let record_cache_hits = match AnalyticsMode::from_env() {
            AnalyticsMode::Strict => false,
            AnalyticsMode::Complete => true,
            AnalyticsMode::Custom => env::var("RECORD_CACHE_HITS")
                .unwrap_or_else(|_| "false".to_string())
                .parse()?,
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            catalog_path: PathBuf::from(
                env::var("CATALOG_PATH").unwrap_or_else(|_| "./data/tools.json".to_string()),
            ),
            shutdown_timeout_secs: env::var("SHUTDOWN_TIMEOUT")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            cache_ttl_secs: env::var("CACHE_TTL_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()?,
            cache_max_entries: env::var("CACHE_MAX_ENTRIES")
                .unwrap_or_else(|_| "100".to_string())
                .parse()?,
            analytics_capacity: env::var("ANALYTICS_CAPACITY")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()?,
            record_cache_hits,
        })
    }

    /// Engine tunables derived from this configuration.
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
            cache_max_entries: self.cache_max_entries,
            analytics_capacity: self.analytics_capacity,
            record_cache_hits: self.record_cache_hits,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            catalog_path: PathBuf::from("./data/tools.json"),
            shutdown_timeout_secs: 30,
            cache_ttl_secs: 300,
            cache_max_entries: 100,
            analytics_capacity: 1000,
            record_cache_hits: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_engine_settings() {
        let settings = Config::default().engine_settings();

        assert_eq!(settings, EngineSettings::default());
    }

    #[test]
    fn test_zero_ttl_maps_to_zero_duration() {
        let config = Config {
            cache_ttl_secs: 0,
            ..Config::default()
        };
        assert!(config.engine_settings().cache_ttl.is_zero());
    }
}
