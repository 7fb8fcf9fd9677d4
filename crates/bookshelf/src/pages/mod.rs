//! Page loaders and the registry that binds them to routes.

mod book;
mod home;
mod search;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bookshelf_core::render::RenderError;
use bookshelf_core::route::{
    PageId, PageProps, PageResult, RenderMode, RouteDescriptor, RouteError, RouteParams,
    RouteTable,
};
use bookshelf_core::source::BookSource;

pub use book::BookLoader;
pub use home::HomeLoader;
pub use search::{SearchLoader, SEARCH_TRIGGER};

use crate::config::Config;

/// Produces the data of one page.
#[async_trait]
pub trait PageLoader: Send + Sync {
    /// Parameter combinations computed ahead of traffic.
    ///
    /// Only consulted for precomputed routes. Routes without path
    /// parameters have exactly one combination.
    async fn static_paths(&self) -> Result<Vec<RouteParams>, RenderError> {
        Ok(vec![RouteParams::new()])
    }

    /// Loads the page data for `params`.
    async fn load(&self, params: &RouteParams) -> Result<PageResult<PageProps>, RenderError>;
}

/// Routes of the site together with the loader of each page.
pub struct PageRegistry {
    routes: RouteTable,
    loaders: HashMap<PageId, Arc<dyn PageLoader>>,
}

impl PageRegistry {
    /// Registers the three catalog pages with the modes chosen by `config`.
    pub fn new(config: &Config, source: Arc<dyn BookSource>) -> Result<Self, RouteError> {
        let routes = RouteTable::builder()
            .register(RouteDescriptor::new(
                PageId::Home,
                "/",
                config.home_render_mode(),
            )?)?
            .register(RouteDescriptor::new(
                PageId::Book,
                "/book/{id}",
                config.book_render_mode(),
            )?)?
            .register(RouteDescriptor::new(
                PageId::Search,
                "/search",
                RenderMode::deferred(SEARCH_TRIGGER),
            )?)?
            .build();

        let mut loaders: HashMap<PageId, Arc<dyn PageLoader>> = HashMap::new();
        loaders.insert(PageId::Home, Arc::new(HomeLoader::new(Arc::clone(&source))));
        loaders.insert(PageId::Book, Arc::new(BookLoader::new(Arc::clone(&source))));
        loaders.insert(PageId::Search, Arc::new(SearchLoader::new(source)));

        Ok(Self { routes, loaders })
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn route(&self, page: PageId) -> Option<&RouteDescriptor> {
        self.routes.get(page)
    }

    pub fn loader(&self, page: PageId) -> Option<Arc<dyn PageLoader>> {
        self.loaders.get(&page).cloned()
    }
}

impl std::fmt::Debug for PageRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRegistry")
            .field("routes", &self.routes)
            .field("loaders", &self.loaders.keys().collect::<Vec<_>>())
            .finish()
    }
}
