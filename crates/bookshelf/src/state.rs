//! Shared application state passed to every request handler.

use std::sync::Arc;

use bookshelf_core::cache::Cache;
use bookshelf_core::layout::{site_layouts, LayoutRegistry};
use bookshelf_core::route::RouteError;
use bookshelf_core::source::BookSource;

use crate::{cache::MemoryCache, config::Config, pages::PageRegistry, resolver::Resolver};

#[derive(Clone, Debug)]
pub struct AppState {
    /// Resolves routes to page states.
    pub resolver: Resolver,
    /// Page shells, global shell outermost.
    pub layouts: Arc<LayoutRegistry>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates the state for `source` with an in-memory page cache.
    pub fn new(config: Config, source: Arc<dyn BookSource>) -> Result<Self, RouteError> {
        let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new(config.cache_max_entries));
        let pages = PageRegistry::new(&config, source)?;

        tracing::debug!(
            routes = pages.routes().len(),
            cache_max_entries = config.cache_max_entries,
            home_mode = %config.home_mode,
            book_fallback = %config.book_fallback,
            "Application state created"
        );

        Ok(Self {
            resolver: Resolver::new(pages, cache),
            layouts: Arc::new(site_layouts()),
            config: Arc::new(config),
        })
    }
}
