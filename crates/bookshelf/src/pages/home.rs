use std::sync::Arc;

use async_trait::async_trait;
use bookshelf_core::render::RenderError;
use bookshelf_core::route::{PageProps, PageResult, RouteParams};
use bookshelf_core::source::BookSource;

use super::PageLoader;

/// Home page: the whole catalog plus a random recommendation list.
pub struct HomeLoader {
    source: Arc<dyn BookSource>,
}

impl HomeLoader {
    pub fn new(source: Arc<dyn BookSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl PageLoader for HomeLoader {
    async fn load(&self, _params: &RouteParams) -> Result<PageResult<PageProps>, RenderError> {
        // Both lists are required; either failure fails the page.
        let (all_books, recommended_books) = tokio::try_join!(
            self.source.fetch_books(None),
            self.source.fetch_random_books()
        )?;

        tracing::debug!(
            all = all_books.len(),
            recommended = recommended_books.len(),
            "Loaded home page data"
        );

        Ok(PageResult::Props(PageProps::Home {
            all_books,
            recommended_books,
        }))
    }
}
