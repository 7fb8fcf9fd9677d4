use async_trait::async_trait;

use crate::book::{BookId, BookRecord};

use super::Result;

/// Read-only access to the book catalog.
#[async_trait]
pub trait BookSource: Send + Sync {
    /// Lists books, optionally filtered by a search query.
    async fn fetch_books(&self, query: Option<&str>) -> Result<Vec<BookRecord>>;

    /// Gets a single book. `Ok(None)` means the catalog has no such book.
    async fn fetch_one_book(&self, id: BookId) -> Result<Option<BookRecord>>;

    /// Lists a random selection of recommended books.
    async fn fetch_random_books(&self) -> Result<Vec<BookRecord>>;
}
