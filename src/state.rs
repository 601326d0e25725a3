use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::search::{SearchEngine, SearchOptions};
use crate::session::GeneratedSession;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Application state shared across all request handlers.
pub struct AppState {
    pub engine: Arc<SearchEngine>,
    /// Hex SHA256 of the loaded catalog, computed once at startup
    pub catalog_fingerprint: String,
    /// Flag indicating the service is ready (catalog loaded and warmed up)
    pub ready: AtomicBool,
    pub config: Arc<Config>,
}

impl AppState {
    /// Load the catalog from `config.catalog_path` and build the engine.
    pub fn new(config: Config) -> Result<Self> {
        let catalog = Catalog::load(&config.catalog_path)?;
        Self::with_catalog(config, catalog)
    }

    /// Build state around a catalog that is already in memory.
    pub fn with_catalog(config: Config, catalog: Catalog) -> Result<Self> {
        if catalog.is_empty() {
            return Err(AppError::CatalogError(
                "Catalog contains no tools".to_string(),
            ));
        }

        let catalog_fingerprint = catalog.fingerprint();
        let engine = SearchEngine::new(
            Arc::new(catalog),
            config.engine_settings(),
            Arc::new(GeneratedSession::new()),
        );

        let state = Self {
            engine: Arc::new(engine),
            catalog_fingerprint,
            ready: AtomicBool::new(false),
            config: Arc::new(config),
        };

        state.warmup();

        state.ready.store(true, Ordering::SeqCst);

        Ok(state)
    }

    /// Run one ranking pass so a broken catalog shows up in the startup logs
    /// rather than on the first request. Cache and analytics stay empty.
    fn warmup(&self) {
        tracing::info!("Running search warmup...");

        let ranked = self.engine.rank("calculator", &SearchOptions::default());

        tracing::info!(
            tools = self.engine.catalog().len(),
            warmup_matches = ranked.len(),
            "Search warmup completed successfully"
        );
    }

    /// Check if the service is ready to handle requests.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}
