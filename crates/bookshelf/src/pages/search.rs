use std::sync::Arc;

use async_trait::async_trait;
use bookshelf_core::render::RenderError;
use bookshelf_core::route::{PageProps, PageResult, RouteParams};
use bookshelf_core::source::BookSource;

use super::PageLoader;

/// Query parameter that starts a search.
pub const SEARCH_TRIGGER: &str = "q";

/// Search results for `q`. An empty result list is still a page.
pub struct SearchLoader {
    source: Arc<dyn BookSource>,
}

impl SearchLoader {
    pub fn new(source: Arc<dyn BookSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl PageLoader for SearchLoader {
    async fn load(&self, params: &RouteParams) -> Result<PageResult<PageProps>, RenderError> {
        let query = params.require(SEARCH_TRIGGER)?.trim().to_string();
        let books = self.source.fetch_books(Some(&query)).await?;

        tracing::debug!(query = %query, results = books.len(), "Search completed");
        Ok(PageResult::Props(PageProps::Search { query, books }))
    }
}
