use std::sync::Arc;

use async_trait::async_trait;
use bookshelf_core::book::BookId;
use bookshelf_core::render::RenderError;
use bookshelf_core::route::{PageProps, PageResult, RouteParams};
use bookshelf_core::source::BookSource;

use super::PageLoader;

/// Book ids rendered ahead of traffic.
pub const ENUMERATED_BOOK_IDS: [BookId; 3] = [1, 2, 3];

/// Detail page of one book, keyed by the `id` path parameter.
pub struct BookLoader {
    source: Arc<dyn BookSource>,
}

impl BookLoader {
    pub fn new(source: Arc<dyn BookSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl PageLoader for BookLoader {
    async fn static_paths(&self) -> Result<Vec<RouteParams>, RenderError> {
        Ok(ENUMERATED_BOOK_IDS
            .iter()
            .map(|id| RouteParams::from_pairs([("id", id.to_string())]))
            .collect())
    }

    async fn load(&self, params: &RouteParams) -> Result<PageResult<PageProps>, RenderError> {
        let id: BookId = params.parse("id")?;
        let book = self.source.fetch_one_book(id).await?;

        if book.is_none() {
            tracing::debug!(book_id = id, "Book not in catalog");
        }
        Ok(PageResult::from_option(
            book.map(|book| PageProps::Book { book }),
        ))
    }
}
