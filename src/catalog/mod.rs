//! Static tool catalog consumed by the search engine.
//!
//! The catalog is read once at startup and treated as immutable
//! configuration. Records are shared as `Arc<ToolRecord>` so search results
//! reference catalog entries instead of copying them.

pub mod loader;
pub mod types;

pub use loader::{parse_catalog, LoaderResult};
pub use types::{CategoryCount, ToolRecord};

use crate::error::{AppError, Result};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Ordered, read-only collection of tool records.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tools: Vec<Arc<ToolRecord>>,
}

impl Catalog {
    /// Build a catalog from records already in memory.
    ///
    /// Callers are responsible for id uniqueness here; `from_json` and `load`
    /// enforce it.
    pub fn new(records: Vec<ToolRecord>) -> Self {
        Self {
            tools: records.into_iter().map(Arc::new).collect(),
        }
    }

    /// Parse a catalog from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(parse_catalog(json)?))
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::CatalogError(format!(
                "Failed to read catalog {}: {}",
                path.display(),
                e
            ))
        })?;

        let catalog = Self::from_json(&json)?;

        tracing::info!(
            path = %path.display(),
            tools = catalog.len(),
            fingerprint = %catalog.fingerprint(),
            "Tool catalog loaded"
        );

        Ok(catalog)
    }

    pub fn tools(&self) -> &[Arc<ToolRecord>] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Arc<ToolRecord>> {
        self.tools.iter().find(|tool| tool.id == id)
    }

    /// Active tool counts per category, sorted by category name.
    pub fn categories(&self) -> Vec<CategoryCount> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for tool in self.tools.iter().filter(|t| t.is_active) {
            *counts.entry(tool.category.as_str()).or_default() += 1;
        }

        counts
            .into_iter()
            .map(|(category, tools)| CategoryCount {
                category: category.to_string(),
                tools,
            })
            .collect()
    }

    /// Hex-encoded SHA256 over every field that affects matching or scoring.
    ///
    /// Scores are only comparable between identical catalogs, so the
    /// fingerprint lets clients detect a catalog change.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();

        for tool in &self.tools {
            hasher.update(tool.id.as_bytes());
            hasher.update(b"|");
            hasher.update(tool.name.as_bytes());
            hasher.update(b"|");
            hasher.update(tool.description.as_bytes());
            hasher.update(b"|");
            hasher.update(tool.keywords.join(",").as_bytes());
            hasher.update(b"|");
            hasher.update(tool.category.as_bytes());
            hasher.update(b"|");
            hasher.update(tool.search_volume.unwrap_or(0).to_le_bytes());
            hasher.update([tool.difficulty.unwrap_or(0)]);
            hasher.update(if tool.is_active { b"1" } else { b"0" });
            hasher.update(b"\n");
        }

        hasher
            .finalize()
            .iter()
            .map(|byte| format!("{:02x}", byte))
            .collect()
    }
}
